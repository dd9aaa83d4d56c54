/// 解析器模块
///
/// 提供统一的解析接口和 OBJ / MTL 两种格式的具体实现。
///
/// # 组件（自底向上）
///
/// - `line`: 行分词，OBJ 与 MTL 共用
/// - `attributes`: `v`/`vt`/`vn` 属性表
/// - `face`: 面索引规范化
/// - `dedup`: 顶点去重
/// - `grouping`: 子对象 / 网格组 / 索引组 状态机
/// - `obj_parser`, `mtl_parser`: 顶层驱动
///
/// # 使用示例
///
/// ```rust,no_run
/// use obj_scene::core::ParserConfig;
/// use obj_scene::geometry::loaders::load_scene;
/// use std::path::Path;
///
/// let loaded = load_scene(Path::new("model.obj"), &ParserConfig::default())?;
/// for name in loaded.scene.material_names() {
///     println!("{}: {:?}", name, loaded.material(name).diffuse_color);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::config::ParserConfig;
use crate::core::error::{ObjSceneError, ParseError, Result};
use crate::geometry::material::Material;
use crate::geometry::scene::Scene;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod line;
pub mod attributes;
pub mod face;
pub mod dedup;
pub mod grouping;
pub mod obj_parser;
pub mod mtl_parser;

// 重新导出解析器
pub use obj_parser::ObjParser;
pub use mtl_parser::MtlParser;

/// 解析器所处的阶段
///
/// 输入只在一次解析调用期间被持有；解析结束（无论成功与否）进入 `Closed`，
/// 只有 `clear` 能回到 `Idle`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Parsing,
    Closed,
}

/// 文本资源解析器 trait
///
/// OBJ 与 MTL 解析器共用的生命周期：`parse` → 读取结果 → `clear` → 再次 `parse`。
///
/// # 错误
///
/// 任何错误都会中止整个解析，此时已解析的部分结果不可用。
pub trait AssetParser {
    /// 要求的文件扩展名（含点号，区分大小写）
    fn extension() -> &'static str;

    /// 是否可以开始新的解析
    fn is_idle(&self) -> bool;

    /// 从任意文本输入解析
    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()>;

    /// 丢弃全部解析结果，回到 `Idle`
    fn clear(&mut self);

    /// 从文件解析
    ///
    /// 依次检查：上一次结果是否已清空、扩展名、文件能否打开，然后才读取内容。
    fn parse(&mut self, path: &Path) -> Result<()> {
        if !self.is_idle() {
            return Err(report(ParseError::AlreadyOpen));
        }
        if !path.as_os_str().to_string_lossy().ends_with(Self::extension()) {
            return Err(report(ParseError::WrongExtension {
                path: path.to_path_buf(),
                expected: Self::extension(),
            }));
        }
        let file = File::open(path).map_err(|source| {
            report(ParseError::CannotOpenFile {
                path: path.to_path_buf(),
                source,
            })
        })?;

        crate::parser_debug!(path = %path.display(), "Parsing file");
        self.parse_reader(BufReader::new(file))
    }
}

/// 把解析错误写到诊断通道，再转换成返回值
pub(crate) fn report(err: ParseError) -> ObjSceneError {
    crate::parser_error!(error = %err, "Parse failed");
    err.into()
}

/// 场景及其材质库
#[derive(Debug, Clone, Default)]
pub struct LoadedScene {
    pub scene: Scene,
    pub materials: HashMap<String, Material>,
}

impl LoadedScene {
    /// 按名称查询材质，未命中返回默认材质
    pub fn material(&self, name: &str) -> Material {
        self.materials.get(name).cloned().unwrap_or_default()
    }
}

/// 解析 OBJ 文件，并按配置解析它引用的材质库
///
/// 材质库路径相对于 OBJ 文件所在目录。材质库文件不存在时只记录警告。
pub fn load_scene(path: &Path, config: &ParserConfig) -> Result<LoadedScene> {
    let mut obj = ObjParser::with_config(config);
    obj.parse(path)?;
    let scene = obj.into_scene();

    let mut materials = HashMap::new();
    if let Some(library) = scene.material_library.as_deref().filter(|_| config.load_materials) {
        let mtl_path = path.parent().unwrap_or(Path::new("")).join(library);
        if mtl_path.is_file() {
            let mut mtl = MtlParser::new();
            mtl.parse(&mtl_path)?;
            materials = mtl.into_materials();
        } else {
            crate::parser_warn!(path = %mtl_path.display(), "Material library not found, skipping");
        }
    }

    Ok(LoadedScene { scene, materials })
}
