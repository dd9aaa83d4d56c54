/// MTL 材质库解析器
///
/// 平铺的 "关键字 → 字段" 提取：除了 "当前材质" 之外没有别的状态。
/// 按名称查询时未命中返回默认材质，而不是报错。
use super::line::{fixed, for_each_directive, required_name, Directive};
use super::{report, AssetParser, Phase};
use crate::core::error::{ParseError, Result};
use crate::geometry::material::Material;
use std::collections::HashMap;
use std::io::BufRead;

/// MTL 格式解析器
#[derive(Debug, Default)]
pub struct MtlParser {
    phase: Phase,
    materials: HashMap<String, Material>,
}

impl MtlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn materials(&self) -> &HashMap<String, Material> {
        &self.materials
    }

    pub fn into_materials(self) -> HashMap<String, Material> {
        self.materials
    }

    /// 按名称查询，未命中时返回默认材质
    pub fn material(&self, name: &str) -> Material {
        self.materials.get(name).cloned().unwrap_or_default()
    }
}

impl AssetParser for MtlParser {
    fn extension() -> &'static str {
        ".mtl"
    }

    fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        if !self.is_idle() {
            return Err(report(ParseError::AlreadyOpen));
        }
        self.phase = Phase::Parsing;

        let mut state = MtlState::default();
        let result = for_each_directive(reader, |line, directive| state.dispatch(line, directive));
        self.phase = Phase::Closed;

        result.map_err(report)?;
        self.materials = state.materials;

        crate::parser_info!(materials = self.materials.len(), "MTL parsed");
        Ok(())
    }

    fn clear(&mut self) {
        self.materials.clear();
        self.phase = Phase::Idle;
    }
}

/// 一条属性指令写入材质的哪个字段
enum Field {
    Color(fn(&mut Material) -> &mut [f32; 3]),
    Scalar(fn(&mut Material) -> &mut f32),
    /// `Tr`：写入 `1 - value` 到不透明度
    Transparency,
    Illumination,
    Map(fn(&mut Material) -> &mut String),
}

fn field(keyword: &str) -> Option<Field> {
    let field = match keyword {
        "Ka" => Field::Color(|m| &mut m.ambient_color),
        "Kd" => Field::Color(|m| &mut m.diffuse_color),
        "Ks" => Field::Color(|m| &mut m.specular_color),
        "Ke" => Field::Color(|m| &mut m.emissive_color),
        "Tf" => Field::Color(|m| &mut m.transmission_filter),
        "Ns" => Field::Scalar(|m| &mut m.specular_exponent),
        "d" => Field::Scalar(|m| &mut m.opacity),
        "Ni" => Field::Scalar(|m| &mut m.optical_density),
        "Tr" => Field::Transparency,
        "illum" => Field::Illumination,
        "map_Ka" => Field::Map(|m| &mut m.ambient_map),
        "map_Kd" => Field::Map(|m| &mut m.diffuse_map),
        "map_Ks" => Field::Map(|m| &mut m.specular_map),
        "map_Ns" => Field::Map(|m| &mut m.specular_highlight_map),
        "map_d" => Field::Map(|m| &mut m.alpha_map),
        "map_Bump" | "bump" => Field::Map(|m| &mut m.bump_map),
        "disp" => Field::Map(|m| &mut m.displacement_map),
        "Pr" | "map_Pr" => Field::Map(|m| &mut m.roughness_map),
        "Pm" | "map_Pm" => Field::Map(|m| &mut m.metallic_map),
        "Ps" | "map_Ps" => Field::Map(|m| &mut m.sheen_map),
        "map_Ke" => Field::Map(|m| &mut m.emissive_map),
        "norm" | "map_Norm" => Field::Map(|m| &mut m.normal_map),
        _ => return None,
    };
    Some(field)
}

#[derive(Default)]
struct MtlState {
    materials: HashMap<String, Material>,
    current: Option<String>,
}

impl MtlState {
    fn dispatch(&mut self, line: usize, directive: Directive<'_>) -> std::result::Result<(), ParseError> {
        let keyword = directive.keyword;
        let args = directive.args;

        if keyword == "newmtl" {
            let name = required_name(line, &directive)?;
            crate::parser_debug!(line, material = name, "new material");
            self.materials.insert(name.to_string(), Material::with_name(name));
            self.current = Some(name.to_string());
            return Ok(());
        }

        let field = field(keyword).ok_or_else(|| ParseError::UnknownDirective {
            line,
            directive: keyword.to_string(),
        })?;

        let material = self
            .current
            .as_ref()
            .and_then(|name| self.materials.get_mut(name))
            .ok_or_else(|| ParseError::NoActiveMaterial {
                line,
                directive: keyword.to_string(),
            })?;

        match field {
            Field::Color(slot) => *slot(material) = fixed::<f32, 3>(line, keyword, args, "3")?,
            Field::Scalar(slot) => {
                let [value] = fixed::<f32, 1>(line, keyword, args, "1")?;
                *slot(material) = value;
            }
            Field::Transparency => {
                let [value] = fixed::<f32, 1>(line, keyword, args, "1")?;
                material.opacity = 1.0 - value;
            }
            Field::Illumination => {
                let [value] = fixed::<u32, 1>(line, keyword, args, "1")?;
                material.illumination_model = value;
            }
            Field::Map(slot) => {
                let files: Vec<&str> = args.split_whitespace().collect();
                match files[..] {
                    [file] => *slot(material) = file.to_string(),
                    _ => {
                        return Err(ParseError::WrongComponentCount {
                            line,
                            directive: keyword.to_string(),
                            expected: "1 filename",
                            found: files.len(),
                        })
                    }
                }
            }
        }
        Ok(())
    }
}
