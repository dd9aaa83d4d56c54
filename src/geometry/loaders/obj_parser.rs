//! OBJ 文件解析器
//!
//! 逐行读取 `.obj` 文本，把 `v`/`vt`/`vn` 写入属性表，
//! 把 `f` 经过面索引规范化和顶点去重后交给分组状态机。
//!
//! # 支持的指令
//!
//! `o`、`mtllib`、`g`、`usemtl`、`v`、`vt`、`vn`、`s`、`f`、`l`。
//! 其他任何关键字都会中止整个解析。
//!
//! # 使用示例
//!
//! ```rust
//! use obj_scene::geometry::loaders::{AssetParser, ObjParser};
//!
//! let mut parser = ObjParser::new();
//! parser.parse_reader("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n".as_bytes())?;
//! assert_eq!(parser.scene().vertex_count(), 3);
//! # Ok::<(), obj_scene::core::ObjSceneError>(())
//! ```

use super::attributes::AttributeTable;
use super::dedup::VertexDeduplicator;
use super::face::FaceIndex;
use super::grouping::GroupBuilder;
use super::line::{for_each_directive, required_name, Directive};
use super::{report, AssetParser, Phase};
use crate::core::config::ParserConfig;
use crate::core::error::{ParseError, Result};
use crate::geometry::scene::Scene;
use std::io::BufRead;

/// OBJ 格式解析器
///
/// 一个实例一次只持有一份解析结果：再次解析前必须调用 [`AssetParser::clear`]。
#[derive(Debug)]
pub struct ObjParser {
    phase: Phase,
    config: ParserConfig,
    scene: Scene,
}

impl Default for ObjParser {
    fn default() -> Self {
        Self::with_config(&ParserConfig::default())
    }
}

impl ObjParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            phase: Phase::Idle,
            config: config.clone(),
            scene: Scene::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 解析结果；解析失败后为空场景
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl AssetParser for ObjParser {
    fn extension() -> &'static str {
        ".obj"
    }

    fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        if !self.is_idle() {
            return Err(report(ParseError::AlreadyOpen));
        }
        self.phase = Phase::Parsing;

        let mut state = ObjState::new(self.config.reject_degenerate_faces);
        let result = for_each_directive(reader, |line, directive| state.dispatch(line, directive));
        self.phase = Phase::Closed;

        let line_count = result.map_err(report)?;
        self.scene = state.into_scene();

        crate::parser_info!(
            lines = line_count,
            vertices = self.scene.vertex_count(),
            sub_objects = self.scene.sub_objects.len(),
            polyline_indices = self.scene.line_indices.len(),
            "OBJ parsed"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.scene.clear();
        self.phase = Phase::Idle;
    }
}

/// 单次解析过程中的全部可变状态，解析成功后转换为 [`Scene`]
struct ObjState {
    attributes: AttributeTable,
    dedup: VertexDeduplicator,
    groups: GroupBuilder,
    line_indices: Vec<u32>,
    material_library: Option<String>,
    reject_degenerate_faces: bool,
}

impl ObjState {
    fn new(reject_degenerate_faces: bool) -> Self {
        Self {
            attributes: AttributeTable::new(),
            dedup: VertexDeduplicator::new(),
            groups: GroupBuilder::new(),
            line_indices: Vec::new(),
            material_library: None,
            reject_degenerate_faces,
        }
    }

    fn dispatch(&mut self, line: usize, directive: Directive<'_>) -> std::result::Result<(), ParseError> {
        match directive.keyword {
            "o" => {
                let name = required_name(line, &directive)?;
                crate::parser_debug!(line, object = name, "sub-object");
                self.groups.begin_sub_object(name);
            }
            "mtllib" => {
                let name = required_name(line, &directive)?;
                self.material_library = Some(name.to_string());
            }
            "g" => {
                let name = required_name(line, &directive)?;
                crate::parser_debug!(line, group = name, "mesh group");
                self.groups.begin_mesh_group(name);
            }
            "usemtl" => {
                let name = required_name(line, &directive)?;
                crate::parser_debug!(line, material = name, "use material");
                self.groups.use_material(name);
            }
            "v" => self.attributes.append_position(line, directive.args)?,
            "vt" => self.attributes.append_texcoord(line, directive.args)?,
            "vn" => self.attributes.append_normal(line, directive.args)?,
            "s" => {
                let smooth = match directive.args {
                    "1" => true,
                    "off" => false,
                    other => {
                        return Err(ParseError::InvalidSmoothingOption {
                            line,
                            option: other.to_string(),
                        })
                    }
                };
                crate::parser_debug!(line, smooth, "smoothing");
                self.groups.set_smoothing(smooth);
            }
            "f" => self.face(line, &directive)?,
            "l" => self.polyline(line, &directive)?,
            other => {
                return Err(ParseError::UnknownDirective {
                    line,
                    directive: other.to_string(),
                })
            }
        }
        Ok(())
    }

    fn face(&mut self, line: usize, directive: &Directive<'_>) -> std::result::Result<(), ParseError> {
        required_name(line, directive)?;

        let corners = directive
            .args
            .split_whitespace()
            .map(|token| {
                let index = FaceIndex::parse(line, token)?;
                self.dedup.intern_face_index(&self.attributes, line, index)
            })
            .collect::<std::result::Result<Vec<u32>, ParseError>>()?;

        if corners.len() < 3 {
            if self.reject_degenerate_faces {
                return Err(ParseError::DegenerateFace { line, corners: corners.len() });
            }
            crate::parser_warn!(line, corners = corners.len(), "Degenerate face accepted");
        }

        self.groups.push_face(&corners);
        Ok(())
    }

    /// `l`：每个点和面角点一样经过去重，保存顶点缓冲区下标；只接受 `v` 与 `v/vt`
    fn polyline(&mut self, line: usize, directive: &Directive<'_>) -> std::result::Result<(), ParseError> {
        required_name(line, directive)?;

        for token in directive.args.split_whitespace() {
            let index = FaceIndex::parse(line, token)?;
            if index.normal != 0 {
                return Err(ParseError::MalformedFaceIndex {
                    line,
                    token: token.to_string(),
                });
            }
            let slot = self.dedup.intern_face_index(&self.attributes, line, index)?;
            self.line_indices.push(slot);
        }
        Ok(())
    }

    fn into_scene(self) -> Scene {
        Scene {
            vertices: self.dedup.into_vertices(),
            sub_objects: self.groups.finish(),
            line_indices: self.line_indices,
            material_library: self.material_library,
        }
    }
}
