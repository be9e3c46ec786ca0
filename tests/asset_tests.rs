//! Scene Descriptor Tests
//!
//! Tests for:
//! - Loading a skinned, animated scene from JSON
//! - Import-time validation errors
//! - Settings deserialization

use std::sync::Arc;

use anyhow::Result;
use glam::{Mat4, Quat, Vec3};

use myth_skeletal::animation::{AnimationPlayer, Binder};
use myth_skeletal::assets::load_scene_json;
use myth_skeletal::errors::SkeletalError;
use myth_skeletal::settings::{AnimationSettings, BoneResolutionMode};
use myth_skeletal::skinning::calculate_bone_transforms;

const EPSILON: f32 = 1e-5;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const WAVING_ARM: &str = r#"
{
  "bone_resolution": "FlatLookup",
  "nodes": [
    { "name": "Arm", "parent": "Root", "translation": [0.0, 1.0, 0.0] },
    { "name": "Root" }
  ],
  "meshes": [
    {
      "name": "Body",
      "bones": [
        { "name": "Root" },
        {
          "name": "Arm",
          "offset": [1, 0, 0, 0,  0, 1, 0, 0,  0, 0, 1, 0,  0, -1, 0, 1]
        }
      ]
    }
  ],
  "clips": [
    {
      "name": "wave",
      "ticks_per_second": 10.0,
      "channels": [
        {
          "node": "Arm",
          "position_keys": [[0.0, [0.0, 0.0, 0.0]], [10.0, [0.0, 0.0, 10.0]]],
          "rotation_keys": [[0.0, [0.0, 0.0, 0.0, 1.0]]]
        },
        { "node": "Tail", "position_keys": [[0.0, [1.0, 1.0, 1.0]]] }
      ]
    }
  ]
}
"#;

// ============================================================================
// Loading
// ============================================================================

#[test]
fn loads_hierarchy_regardless_of_order() -> Result<()> {
    init_logger();
    let (scene, clips) = load_scene_json(WAVING_ARM)?;

    let root = scene.find_node_by_name("Root").expect("root");
    let arm = scene.find_node_by_name("Arm").expect("arm");
    assert_eq!(scene.get_node(arm).unwrap().parent(), Some(root));
    assert_eq!(scene.root_nodes(), &[root]);
    assert_eq!(scene.bone_resolution(), BoneResolutionMode::FlatLookup);

    assert_eq!(clips.len(), 1);
    assert_eq!(clips[0].duration_ticks, 10.0);
    Ok(())
}

#[test]
fn loaded_scene_animates_and_skins() -> Result<()> {
    init_logger();
    let (scene, clips) = load_scene_json(WAVING_ARM)?;

    let bound = Arc::new(Binder::bind(&scene, clips[0].clone()));
    // "Tail" has no node.
    assert_eq!(bound.bindings().len(), 1);

    let mut player = AnimationPlayer::new();
    player.play(bound);
    player.update(0.5);

    let bones = calculate_bone_transforms(&scene, player.pose());
    let (body, _) = scene.meshes().next().expect("mesh");

    assert_eq!(bones.get(body, 0), Some(Mat4::IDENTITY));
    let expected = Mat4::from_translation(Vec3::new(0.0, -1.0, 5.0));
    assert!(bones.get(body, 1).unwrap().abs_diff_eq(expected, EPSILON));
    Ok(())
}

#[test]
fn rotation_keys_are_normalized_on_load() -> Result<()> {
    // Both keys are unit rotations scaled by 2.
    let half = std::f32::consts::FRAC_PI_4;
    let json = format!(
        r#"{{
        "nodes": [ {{ "name": "A" }} ],
        "clips": [ {{
            "name": "turn",
            "channels": [ {{ "node": "A", "rotation_keys": [
                [0.0, [0.0, 0.0, 0.0, 2.0]],
                [1.0, [0.0, 0.0, {z}, {w}]]
            ] }} ]
        }} ]
    }}"#,
        z = 2.0 * half.sin(),
        w = 2.0 * half.cos(),
    );
    let (_scene, clips) = load_scene_json(&json)?;

    let local = clips[0].channels[0].sample_local(0.25);
    let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_8);
    assert!((local.rotation.length() - 1.0).abs() < EPSILON);
    assert!(local.rotation.abs_diff_eq(expected, 1e-4), "got {:?}", local.rotation);
    Ok(())
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn rejects_duplicate_node_names() {
    let json = r#"{ "nodes": [ { "name": "A" }, { "name": "A" } ] }"#;
    let err = load_scene_json(json).err().expect("duplicate");
    assert!(matches!(err, SkeletalError::DuplicateNodeName(name) if name == "A"));
}

#[test]
fn rejects_unknown_parent() {
    let json = r#"{ "nodes": [ { "name": "A", "parent": "Nowhere" } ] }"#;
    let err = load_scene_json(json).err().expect("unknown parent");
    assert!(matches!(err, SkeletalError::UnknownParent { .. }));
}

#[test]
fn rejects_parent_cycles() {
    let json = r#"{ "nodes": [ { "name": "A", "parent": "B" }, { "name": "B", "parent": "A" } ] }"#;
    let err = load_scene_json(json).err().expect("cycle");
    assert!(matches!(err, SkeletalError::UnknownParent { .. }));
}

#[test]
fn rejects_short_offset_matrix() {
    let json = r#"{
        "nodes": [ { "name": "A" } ],
        "meshes": [ { "name": "M", "bones": [ { "name": "A", "offset": [1, 0, 0] } ] } ]
    }"#;
    let err = load_scene_json(json).err().expect("bad matrix");
    assert!(matches!(err, SkeletalError::InvalidMatrix { len: 3, .. }));
}

#[test]
fn rejects_unsorted_keys() {
    let json = r#"{
        "nodes": [ { "name": "A" } ],
        "clips": [ {
            "name": "bad",
            "channels": [ { "node": "A", "position_keys": [[2.0, [0, 0, 0]], [1.0, [1, 1, 1]]] } ]
        } ]
    }"#;
    let err = load_scene_json(json).err().expect("unsorted");
    assert!(matches!(err, SkeletalError::UnsortedKeyframes { track: "position", .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = load_scene_json("{ nodes: ").err().expect("parse");
    assert!(matches!(err, SkeletalError::Json(_)));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_deserialize_with_defaults() -> Result<()> {
    let settings: AnimationSettings = serde_json::from_str(r#"{ "bone_resolution": "HierarchicalCompose" }"#)?;
    assert_eq!(settings.bone_resolution, BoneResolutionMode::HierarchicalCompose);
    assert_eq!(settings, AnimationSettings {
        bone_resolution: BoneResolutionMode::HierarchicalCompose,
        ..Default::default()
    });
    Ok(())
}
