/// 分组状态机
///
/// 维护 子对象 → 网格组 → 索引组 的嵌套，以及当前材质与平滑模式。
///
/// # 复用或新建索引组
///
/// 末尾索引组上的材质和平滑模式各自带一个 "已写入" 标记
/// （材质非空 / `SmoothShading` 不是 `Unset`）。`usemtl` 与 `s` 共用同一条规则：
///
/// - 当前网格组还没有索引组：新建
/// - 末尾索引组上该属性还没写入：回填到末尾索引组上，即使它已经有面
/// - 末尾索引组上该属性已写入且值相同：什么也不做
/// - 其他情况：新建索引组，另一种属性沿用当前值
///
/// 因此连续两条相同的 `usemtl` 不会产生两个索引组，`usemtl` 与 `s`
/// 会落到同一个末尾索引组上。

use crate::geometry::scene::{IndexGroup, MeshGroup, SmoothShading, SubObject, UNNAMED};

/// 状态机当前所处的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingState {
    NoSubObject,
    SubObjectOpen,
    MeshGroupOpen,
    IndexGroupOpen,
}

/// `usemtl` / `s` 带来的状态变化
#[derive(Debug, Clone, Copy)]
enum StateChange<'a> {
    Material(&'a str),
    Smoothing(bool),
}

impl StateChange<'_> {
    /// 末尾索引组上该属性是否已经写入过
    fn is_written(&self, group: &IndexGroup) -> bool {
        match *self {
            StateChange::Material(_) => group.has_material(),
            StateChange::Smoothing(_) => group.smooth_shading.is_set(),
        }
    }

    fn matches(&self, group: &IndexGroup) -> bool {
        match *self {
            StateChange::Material(name) => group.material == name,
            StateChange::Smoothing(smooth) => group.smooth_shading == SmoothShading::from(smooth),
        }
    }

    /// 是否需要新建索引组
    fn opens_group(&self, trailing: Option<&IndexGroup>) -> bool {
        match trailing {
            None => true,
            Some(group) => self.is_written(group) && !self.matches(group),
        }
    }

    fn apply(&self, group: &mut IndexGroup) {
        match *self {
            StateChange::Material(name) => {
                if group.material != name {
                    group.material = name.to_string();
                }
            }
            StateChange::Smoothing(smooth) => group.smooth_shading = smooth.into(),
        }
    }
}

#[derive(Debug)]
pub struct GroupBuilder {
    sub_objects: Vec<SubObject>,
    material: String,
    smooth: bool,
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self {
            sub_objects: Vec::new(),
            material: String::new(),
            smooth: true,
        }
    }
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GroupingState {
        match self.sub_objects.last() {
            None => GroupingState::NoSubObject,
            Some(sub) => match sub.mesh_groups.last() {
                None => GroupingState::SubObjectOpen,
                Some(mesh) if mesh.index_groups.is_empty() => GroupingState::MeshGroupOpen,
                Some(_) => GroupingState::IndexGroupOpen,
            },
        }
    }

    /// 当前材质名，未设置时为空
    pub fn active_material(&self) -> &str {
        &self.material
    }

    pub fn active_smoothing(&self) -> bool {
        self.smooth
    }

    /// `o`：总是新建子对象，之前的分组不再接收新的面
    pub fn begin_sub_object(&mut self, name: &str) {
        self.sub_objects.push(SubObject::new(name));
    }

    /// `g`：没有子对象时先合成一个 "Unnamed"，再新建网格组
    pub fn begin_mesh_group(&mut self, name: &str) {
        if self.sub_objects.is_empty() {
            self.sub_objects.push(SubObject::new(UNNAMED));
        }
        let last = self.sub_objects.len() - 1;
        self.sub_objects[last].mesh_groups.push(MeshGroup::new(name));
    }

    /// `usemtl`
    pub fn use_material(&mut self, name: &str) {
        self.material = name.to_string();
        self.change_state(StateChange::Material(name));
    }

    /// `s 1` / `s off`
    pub fn set_smoothing(&mut self, smooth: bool) {
        self.smooth = smooth;
        self.change_state(StateChange::Smoothing(smooth));
    }

    /// `f`：把一个面的顶点槽位追加到末尾索引组
    pub fn push_face(&mut self, corners: &[u32]) {
        let group = self.ensure_open_group_chain();
        group.indices.extend_from_slice(corners);
        group.face_sizes.push(corners.len() as u32);
    }

    pub fn sub_objects(&self) -> &[SubObject] {
        &self.sub_objects
    }

    pub fn finish(self) -> Vec<SubObject> {
        self.sub_objects
    }

    fn change_state(&mut self, change: StateChange<'_>) {
        let fresh = self.fresh_group();
        let mesh = self.ensure_mesh_group();

        if change.opens_group(mesh.index_groups.last()) {
            let mut group = fresh;
            change.apply(&mut group);
            mesh.index_groups.push(group);
        } else if let Some(trailing) = mesh.index_groups.last_mut() {
            change.apply(trailing);
        }
    }

    /// `usemtl`/`s` 新建的索引组沿用当前材质；平滑模式沿用当前值但标记为未写入
    fn fresh_group(&self) -> IndexGroup {
        IndexGroup {
            material: self.material.clone(),
            smooth_shading: SmoothShading::Unset(self.smooth),
            ..Default::default()
        }
    }

    /// 缺少子对象或网格组时合成 "Unnamed"
    fn ensure_mesh_group(&mut self) -> &mut MeshGroup {
        if self.sub_objects.is_empty() {
            self.sub_objects.push(SubObject::new(UNNAMED));
        }
        let last_sub = self.sub_objects.len() - 1;
        let sub = &mut self.sub_objects[last_sub];
        if sub.mesh_groups.is_empty() {
            sub.mesh_groups.push(MeshGroup::new(UNNAMED));
        }
        let last_mesh = sub.mesh_groups.len() - 1;
        &mut sub.mesh_groups[last_mesh]
    }

    /// 保证 子对象 → 网格组 → 索引组 整条链都存在，返回末尾索引组
    ///
    /// 为 `f` 合成的索引组材质与平滑模式都未写入，之后的 `usemtl`/`s` 会回填到它上面。
    fn ensure_open_group_chain(&mut self) -> &mut IndexGroup {
        let mesh = self.ensure_mesh_group();
        if mesh.index_groups.is_empty() {
            mesh.index_groups.push(IndexGroup::default());
        }
        let last = mesh.index_groups.len() - 1;
        &mut mesh.index_groups[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(builder: &GroupBuilder) -> Vec<&IndexGroup> {
        builder
            .sub_objects()
            .iter()
            .flat_map(|sub| sub.mesh_groups.iter())
            .flat_map(|mesh| mesh.index_groups.iter())
            .collect()
    }

    #[test]
    fn test_states() {
        let mut builder = GroupBuilder::new();
        assert_eq!(builder.state(), GroupingState::NoSubObject);
        builder.begin_sub_object("cube");
        assert_eq!(builder.state(), GroupingState::SubObjectOpen);
        builder.begin_mesh_group("top");
        assert_eq!(builder.state(), GroupingState::MeshGroupOpen);
        builder.push_face(&[0, 1, 2]);
        assert_eq!(builder.state(), GroupingState::IndexGroupOpen);
    }

    #[test]
    fn test_face_synthesizes_chain() {
        let mut builder = GroupBuilder::new();
        builder.push_face(&[0, 1, 2]);

        let subs = builder.finish();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, UNNAMED);
        assert_eq!(subs[0].mesh_groups[0].name, UNNAMED);
        let group = &subs[0].mesh_groups[0].index_groups[0];
        assert_eq!(group.indices, vec![0, 1, 2]);
        assert!(!group.has_material());
        assert!(!group.smooth_shading.is_set());
    }

    #[test]
    fn test_group_before_object_is_appended() {
        let mut builder = GroupBuilder::new();
        builder.begin_mesh_group("legs");
        let subs = builder.finish();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, UNNAMED);
        assert_eq!(subs[0].mesh_groups[0].name, "legs");
    }

    #[test]
    fn test_repeated_usemtl_keeps_one_group() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.use_material("A");
        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].material, "A");
    }

    #[test]
    fn test_repeated_usemtl_after_faces_is_noop() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.push_face(&[0, 1, 2]);
        builder.use_material("A");
        builder.push_face(&[2, 1, 3]);
        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].indices, vec![0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_smoothing_then_material_share_group() {
        let mut builder = GroupBuilder::new();
        builder.set_smoothing(false);
        builder.use_material("A");
        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].material, "A");
        assert_eq!(all[0].smooth_shading, SmoothShading::Off);
    }

    #[test]
    fn test_material_then_smoothing_share_group() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.set_smoothing(true);
        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].smooth_shading, SmoothShading::On);
    }

    #[test]
    fn test_material_change_opens_group_and_inherits_smoothing() {
        let mut builder = GroupBuilder::new();
        builder.set_smoothing(false);
        builder.use_material("A");
        builder.push_face(&[0, 1, 2]);
        builder.use_material("B");
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].material, "B");
        assert_eq!(all[1].smooth_shading, SmoothShading::Unset(false));
        assert!(!all[1].smooth_shading.is_smooth());
    }

    #[test]
    fn test_smoothing_change_opens_group_and_inherits_material() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.set_smoothing(true);
        builder.push_face(&[0, 1, 2]);
        builder.set_smoothing(false);
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].material, "A");
        assert_eq!(all[1].smooth_shading, SmoothShading::Off);
    }

    #[test]
    fn test_smoothing_matching_inherited_value_is_written() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.push_face(&[0, 1, 2]);
        builder.set_smoothing(true);

        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].smooth_shading, SmoothShading::On);
    }

    #[test]
    fn test_material_backfills_group_with_faces() {
        let mut builder = GroupBuilder::new();
        builder.set_smoothing(false);
        builder.push_face(&[0, 1, 2]);
        builder.use_material("A");
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].material, "A");
        assert_eq!(all[0].smooth_shading, SmoothShading::Off);
        assert_eq!(all[0].indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_smoothing_backfills_group_with_faces() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.push_face(&[0, 1, 2]);
        builder.set_smoothing(false);
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].material, "A");
        assert_eq!(all[0].smooth_shading, SmoothShading::Off);
    }

    #[test]
    fn test_material_backfills_synthesized_group() {
        let mut builder = GroupBuilder::new();
        builder.push_face(&[0, 1, 2]);
        builder.use_material("A");
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].material, "A");
        assert_eq!(all[0].indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_written_smoothing_change_opens_group() {
        let mut builder = GroupBuilder::new();
        builder.set_smoothing(true);
        builder.push_face(&[0, 1, 2]);
        builder.set_smoothing(true);
        builder.set_smoothing(false);

        let all = groups(&builder);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].smooth_shading, SmoothShading::On);
        assert_eq!(all[1].smooth_shading, SmoothShading::Off);
        assert!(all[1].indices.is_empty());
    }

    #[test]
    fn test_switch_back_opens_new_group() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.push_face(&[0, 1, 2]);
        builder.use_material("B");
        builder.use_material("A");
        builder.push_face(&[3, 4, 5]);

        let all = groups(&builder);
        let materials: Vec<&str> = all.iter().map(|g| g.material.as_str()).collect();
        assert_eq!(materials, vec!["A", "B", "A"]);
        assert!(all[1].indices.is_empty());
        assert_eq!(all[2].indices, vec![3, 4, 5]);
    }

    #[test]
    fn test_face_after_mesh_group_starts_unset() {
        let mut builder = GroupBuilder::new();
        builder.use_material("A");
        builder.set_smoothing(false);
        builder.begin_mesh_group("second");
        builder.push_face(&[0, 1, 2]);

        {
            let second = &builder.sub_objects()[0].mesh_groups[1];
            assert_eq!(second.name, "second");
            assert!(!second.index_groups[0].has_material());
            assert_eq!(second.index_groups[0].smooth_shading, SmoothShading::default());
        }
        assert_eq!(builder.active_material(), "A");
        assert!(!builder.active_smoothing());

        builder.use_material("A");
        let second = &builder.sub_objects()[0].mesh_groups[1];
        assert_eq!(second.index_groups.len(), 1);
        assert_eq!(second.index_groups[0].material, "A");
    }

    #[test]
    fn test_object_does_not_close_previous_groups() {
        let mut builder = GroupBuilder::new();
        builder.begin_sub_object("a");
        builder.push_face(&[0, 1, 2]);
        builder.begin_sub_object("b");
        builder.push_face(&[3, 4, 5]);

        let subs = builder.finish();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].mesh_groups[0].index_groups[0].indices, vec![0, 1, 2]);
        assert_eq!(subs[1].mesh_groups[0].index_groups[0].indices, vec![3, 4, 5]);
    }
}
