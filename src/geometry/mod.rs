/// 几何数据模块
///
/// 定义解析结果的数据结构，并提供 OBJ / MTL 文本格式的解析器。
///
/// # 模块结构
///
/// - `vertex`: 去重顶点与按位比较键
/// - `scene`: 子对象 / 网格组 / 索引组三级树
/// - `material`: MTL 材质记录
/// - `loaders`: OBJ 与 MTL 解析器
///
/// # 架构设计
///
/// ```text
/// 文件 (.obj)
///     ↓
/// 行分词 → 指令分发
///     ↓                    ↓
/// 属性表 (v/vt/vn)     分组状态机 + 面索引规范化 + 顶点去重 (f)
///     ↓
/// Scene
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use obj_scene::geometry::loaders::{AssetParser, ObjParser};
/// use std::path::Path;
///
/// let mut parser = ObjParser::new();
/// parser.parse(Path::new("model.obj"))?;
///
/// println!("顶点数: {}", parser.scene().vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod scene;
pub mod material;
pub mod loaders;

// 重新导出常用类型
pub use vertex::Vertex;
pub use scene::{IndexGroup, MeshGroup, Scene, SmoothShading, SubObject};
pub use material::Material;
