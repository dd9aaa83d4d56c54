/// 场景数据结构模块
///
/// 解析器的输出：去重后的顶点缓冲区，子对象 → 网格组 → 索引组三级树，
/// 以及独立的折线索引列表。索引组和折线都引用同一个顶点缓冲区。

use super::vertex::Vertex;

/// 合成分组时使用的默认名称
pub const UNNAMED: &str = "Unnamed";

/// 索引组的平滑着色状态
///
/// 三态：新建的索引组为 `Unset`，携带建组时生效的平滑模式；
/// 第一次被 `s` 写入后变为 `On`/`Off`，之后不会再回到 `Unset`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothShading {
    Unset(bool),
    On,
    Off,
}

impl Default for SmoothShading {
    fn default() -> Self {
        SmoothShading::Unset(true)
    }
}

impl SmoothShading {
    #[inline]
    pub fn is_set(&self) -> bool {
        !matches!(self, SmoothShading::Unset(_))
    }

    /// 实际生效的平滑模式
    #[inline]
    pub fn is_smooth(&self) -> bool {
        match self {
            SmoothShading::Unset(smooth) => *smooth,
            SmoothShading::On => true,
            SmoothShading::Off => false,
        }
    }
}

impl From<bool> for SmoothShading {
    fn from(smooth: bool) -> Self {
        if smooth {
            SmoothShading::On
        } else {
            SmoothShading::Off
        }
    }
}

/// 索引组
///
/// 同一材质、同一平滑状态下连续的面。`indices` 按输入顺序逐面追加，
/// 每个元素都是顶点缓冲区的下标。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexGroup {
    /// 材质名，未设置时为空字符串
    pub material: String,
    pub smooth_shading: SmoothShading,
    pub indices: Vec<u32>,
    /// 每个面的角点数，与 `indices` 对应
    pub face_sizes: Vec<u32>,
}

impl IndexGroup {
    #[inline]
    pub fn has_material(&self) -> bool {
        !self.material.is_empty()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_sizes.len()
    }

    /// 按面遍历索引
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> + '_ {
        let mut offset = 0usize;
        self.face_sizes.iter().map(move |&size| {
            let face = &self.indices[offset..offset + size as usize];
            offset += size as usize;
            face
        })
    }
}

/// 网格组（`g`）
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub name: String,
    pub index_groups: Vec<IndexGroup>,
}

impl MeshGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index_groups: Vec::new(),
        }
    }
}

/// 子对象（`o`）
#[derive(Debug, Clone, PartialEq)]
pub struct SubObject {
    pub name: String,
    pub mesh_groups: Vec<MeshGroup>,
}

impl SubObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh_groups: Vec::new(),
        }
    }
}

/// 完整的解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// 去重后的顶点，顺序为整个文件中的首次出现顺序
    pub vertices: Vec<Vertex>,
    pub sub_objects: Vec<SubObject>,
    /// `l` 指令各点在顶点缓冲区中的下标
    pub line_indices: Vec<u32>,
    /// `mtllib` 引用的材质库文件名
    pub material_library: Option<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 所有索引组中的角点索引总数
    pub fn face_index_count(&self) -> usize {
        self.index_groups().map(|group| group.indices.len()).sum()
    }

    /// 按名称查找第一个子对象
    pub fn sub_object(&self, name: &str) -> Option<&SubObject> {
        self.sub_objects.iter().find(|sub| sub.name == name)
    }

    /// 按树的顺序遍历所有索引组
    pub fn index_groups(&self) -> impl Iterator<Item = &IndexGroup> + '_ {
        self.sub_objects
            .iter()
            .flat_map(|sub| sub.mesh_groups.iter())
            .flat_map(|mesh| mesh.index_groups.iter())
    }

    /// 用到的材质名，按首次使用顺序去重
    pub fn material_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for group in self.index_groups().filter(|group| group.has_material()) {
            if !names.contains(&group.material.as_str()) {
                names.push(group.material.as_str());
            }
        }
        names
    }

    /// 验证没有悬空索引
    pub fn validate(&self) -> Result<(), String> {
        let vertex_count = self.vertices.len();
        for group in self.index_groups() {
            if let Some(&bad) = group.indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(format!(
                    "index {} exceeds vertex buffer length {}",
                    bad, vertex_count
                ));
            }
            let corners: u32 = group.face_sizes.iter().sum();
            if corners as usize != group.indices.len() {
                return Err("face sizes do not add up to the index count".to_string());
            }
        }
        if let Some(&bad) = self.line_indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(format!(
                "line index {} exceeds vertex buffer length {}",
                bad, vertex_count
            ));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.sub_objects.clear();
        self.line_indices.clear();
        self.material_library = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(material: &str, indices: Vec<u32>, face_sizes: Vec<u32>) -> IndexGroup {
        IndexGroup {
            material: material.to_string(),
            indices,
            face_sizes,
            ..Default::default()
        }
    }

    fn scene_with(groups: Vec<IndexGroup>, vertex_count: usize) -> Scene {
        let mut mesh = MeshGroup::new("mesh");
        mesh.index_groups = groups;
        let mut sub = SubObject::new("sub");
        sub.mesh_groups.push(mesh);
        Scene {
            vertices: vec![Vertex::new([0.0; 4], None, None); vertex_count],
            sub_objects: vec![sub],
            ..Default::default()
        }
    }

    #[test]
    fn test_smooth_shading_states() {
        assert!(!SmoothShading::default().is_set());
        assert!(SmoothShading::default().is_smooth());
        assert!(!SmoothShading::Unset(false).is_smooth());
        assert_eq!(SmoothShading::from(false), SmoothShading::Off);
        assert!(SmoothShading::On.is_set());
    }

    #[test]
    fn test_faces_iterator() {
        let g = group("", vec![0, 1, 2, 0, 2, 3, 4], vec![3, 4]);
        let faces: Vec<&[u32]> = g.faces().collect();
        assert_eq!(faces, vec![&[0, 1, 2][..], &[0, 2, 3, 4][..]]);
        assert_eq!(g.face_count(), 2);
    }

    #[test]
    fn test_material_names_dedup() {
        let scene = scene_with(
            vec![
                group("A", vec![], vec![]),
                group("", vec![], vec![]),
                group("B", vec![], vec![]),
                group("A", vec![], vec![]),
            ],
            0,
        );
        assert_eq!(scene.material_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_validate() {
        let scene = scene_with(vec![group("", vec![0, 1, 2], vec![3])], 3);
        assert!(scene.validate().is_ok());
        assert_eq!(scene.face_index_count(), 3);

        let dangling = scene_with(vec![group("", vec![0, 1, 3], vec![3])], 3);
        assert!(dangling.validate().is_err());

        let mut bad_line = scene_with(vec![], 1);
        bad_line.line_indices = vec![0, 1];
        assert!(bad_line.validate().is_err());
    }

    #[test]
    fn test_clear() {
        let mut scene = scene_with(vec![group("", vec![0, 1, 2], vec![3])], 3);
        scene.material_library = Some("a.mtl".to_string());
        scene.clear();
        assert_eq!(scene, Scene::default());
    }
}
