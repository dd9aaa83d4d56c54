//! obj_scene 命令行程序
//!
//! 解析一个 `.obj` 文件（以及它引用的 `.mtl`），打印场景树和材质摘要。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件 obj_scene.toml（不存在时使用默认配置）
//! cargo run -- model.obj
//!
//! # 命令行覆盖
//! cargo run -- --log-level debug --allow-degenerate --no-materials model.obj
//! ```

use anyhow::{bail, Context};
use obj_scene::core::{log, Config};
use obj_scene::geometry::loaders::{load_scene, LoadedScene};
use std::path::Path;
use tracing::info;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（obj_scene.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 解析 OBJ 与 MTL
/// 5. 打印摘要
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("obj_scene.toml");

    // 2. 应用命令行参数
    let paths = config
        .apply_args(std::env::args().skip(1))
        .context("Invalid command line")?;

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "obj_scene starting");

    let path = match paths.as_slice() {
        [path] => Path::new(path),
        [] => bail!("usage: obj_scene [--log-level L] [--allow-degenerate] [--no-materials] <file.obj>"),
        _ => bail!("expected exactly one .obj file, got {}", paths.len()),
    };

    let loaded = load_scene(path, &config.parser)
        .with_context(|| format!("Failed to load '{}'", path.display()))?;

    print_summary(&loaded);
    Ok(())
}

fn print_summary(loaded: &LoadedScene) {
    let scene = &loaded.scene;

    println!("Vertex Count: {}", scene.vertex_count());
    println!("Polyline Indices: {}", scene.line_indices.len());
    if let Some(library) = &scene.material_library {
        println!("Material Library: {}", library);
    }
    println!("SubObjects: {}", scene.sub_objects.len());

    for sub in &scene.sub_objects {
        println!("  SubObject: {}", sub.name);
        for mesh in &sub.mesh_groups {
            println!("    MeshGroup: {}", mesh.name);
            for group in &mesh.index_groups {
                println!(
                    "      IndexGroup - MTL: {}, Smooth: {}, Faces: {}, Indices: {}",
                    if group.has_material() { group.material.as_str() } else { "-" },
                    if group.smooth_shading.is_smooth() { "Yes" } else { "No" },
                    group.face_count(),
                    group.indices.len()
                );
            }
        }
    }

    if loaded.materials.is_empty() {
        return;
    }

    println!("Parsed {} materials.", loaded.materials.len());
    let mut names: Vec<&String> = loaded.materials.keys().collect();
    names.sort();
    for name in names {
        let material = loaded.material(name);
        println!("Material: {}", name);
        println!("  Ambient: {:?}", material.ambient_color);
        println!("  Diffuse: {:?}", material.diffuse_color);
        println!("  Specular: {:?}", material.specular_color);
        println!("  Specular Exponent: {}", material.specular_exponent);
        println!("  Alpha (opacity): {}", material.opacity);
        println!("  Illumination Model: {}", material.illumination_model);
        for map in material.texture_maps() {
            println!("  Texture: {}", map);
        }
    }

    for name in scene.material_names() {
        if !loaded.materials.contains_key(name) {
            tracing::warn!(material = name, "Material used but not defined in library");
        }
    }
}
