/// 材质记录
///
/// MTL 文件中一个 `newmtl` 块解析出的全部属性。
/// 未出现的属性保持默认值（颜色为黑色，不透明度为 1）。
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,

    /// `Ka`
    pub ambient_color: [f32; 3],
    /// `Kd`
    pub diffuse_color: [f32; 3],
    /// `Ks`
    pub specular_color: [f32; 3],
    /// `Ke`
    pub emissive_color: [f32; 3],
    /// `Ns`
    pub specular_exponent: f32,
    /// `d` 直接写入，`Tr` 写入 `1 - value`，后出现的覆盖先出现的
    pub opacity: f32,
    /// `Tf`
    pub transmission_filter: [f32; 3],
    /// `Ni`
    pub optical_density: f32,
    /// `illum`
    pub illumination_model: u32,

    pub ambient_map: String,
    pub diffuse_map: String,
    pub specular_map: String,
    pub specular_highlight_map: String,
    pub alpha_map: String,
    pub bump_map: String,
    pub displacement_map: String,
    pub roughness_map: String,
    pub metallic_map: String,
    pub sheen_map: String,
    pub emissive_map: String,
    pub normal_map: String,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient_color: [0.0; 3],
            diffuse_color: [0.0; 3],
            specular_color: [0.0; 3],
            emissive_color: [0.0; 3],
            specular_exponent: 0.0,
            opacity: 1.0,
            transmission_filter: [1.0; 3],
            optical_density: 1.0,
            illumination_model: 0,
            ambient_map: String::new(),
            diffuse_map: String::new(),
            specular_map: String::new(),
            specular_highlight_map: String::new(),
            alpha_map: String::new(),
            bump_map: String::new(),
            displacement_map: String::new(),
            roughness_map: String::new(),
            metallic_map: String::new(),
            sheen_map: String::new(),
            emissive_map: String::new(),
            normal_map: String::new(),
        }
    }
}

impl Material {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 所有非空的贴图文件名
    pub fn texture_maps(&self) -> Vec<&str> {
        [
            &self.ambient_map,
            &self.diffuse_map,
            &self.specular_map,
            &self.specular_highlight_map,
            &self.alpha_map,
            &self.bump_map,
            &self.displacement_map,
            &self.roughness_map,
            &self.metallic_map,
            &self.sheen_map,
            &self.emissive_map,
            &self.normal_map,
        ]
        .into_iter()
        .filter(|map| !map.is_empty())
        .map(String::as_str)
        .collect()
    }
}
