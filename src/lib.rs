//! obj_scene - Wavefront OBJ / MTL 解析库
//!
//! 把 OBJ 几何文本和 MTL 材质文本解析为结构化的内存场景数据，
//! 供渲染或资产管线使用。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 场景数据结构与 OBJ / MTL 解析器
//!
//! # 使用示例
//!
//! ```
//! use obj_scene::geometry::loaders::{AssetParser, ObjParser};
//!
//! let mut parser = ObjParser::new();
//! parser.parse_reader("v 0 0 0\nv 1 0 0\nv 1 1 0\nusemtl A\nf 1 2 3\n".as_bytes())?;
//!
//! let scene = parser.scene();
//! assert_eq!(scene.vertex_count(), 3);
//! assert_eq!(scene.material_names(), vec!["A"]);
//! # Ok::<(), obj_scene::core::ObjSceneError>(())
//! ```

pub mod core;
pub mod geometry;
