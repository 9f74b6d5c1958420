//! glsandbox CLI - spatial queries over viewer scene files
//!
//! Loads a TOML scene (viewport, orbit camera, meshes) and answers the
//! viewer's culling and picking queries from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glsandbox_core::glsandbox_frustum::extract_frustum;
use glsandbox_core::screen_ray;
use serde::Serialize;

mod config;
mod report;

use config::SceneConfig;
use report::{BoundsReport, CullReport, PickReport, RayReport};

#[derive(Parser)]
#[command(name = "glsandbox")]
#[command(about = "Culling and picking queries over glsandbox scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print local and world bounds of every object
    Bounds {
        /// Scene file
        scene: PathBuf,
    },
    /// Report which objects survive frustum culling
    Cull {
        /// Scene file
        scene: PathBuf,
    },
    /// Print the world-space picking ray through a pixel
    Ray {
        /// Scene file
        scene: PathBuf,
        /// Pixel x, from the left edge
        #[arg(long)]
        x: f64,
        /// Pixel y, from the top edge
        #[arg(long)]
        y: f64,
    },
    /// Find the nearest object under a pixel
    Pick {
        /// Scene file
        scene: PathBuf,
        /// Pixel x, from the left edge
        #[arg(long)]
        x: f64,
        /// Pixel y, from the top edge
        #[arg(long)]
        y: f64,
        /// Accelerate picking with per-object BVHs
        #[arg(long)]
        bvh: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Bounds { scene } => run_bounds(&scene, cli.json),
        Commands::Cull { scene } => run_cull(&scene, cli.json),
        Commands::Ray { scene, x, y } => run_ray(&scene, x, y, cli.json),
        Commands::Pick { scene, x, y, bvh } => run_pick(&scene, x, y, bvh, cli.json),
    }
}

fn emit<T: Serialize>(report: &T, json: bool, print: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print(report);
    }
    Ok(())
}

fn run_bounds(path: &Path, json: bool) -> Result<()> {
    let config = SceneConfig::load(path)?;
    let scene = config.build_scene(false)?;
    emit(&BoundsReport::new(&scene), json, BoundsReport::print)
}

fn run_cull(path: &Path, json: bool) -> Result<()> {
    let config = SceneConfig::load(path)?;
    let scene = config.build_scene(false)?;
    let frustum = extract_frustum(&config.camera().view_proj());
    emit(&CullReport::new(&scene, &frustum), json, CullReport::print)
}

fn run_ray(path: &Path, x: f64, y: f64, json: bool) -> Result<()> {
    let config = SceneConfig::load(path)?;
    let ray = screen_ray(&config.camera(), x, y)
        .context("camera view-projection matrix is not invertible")?;
    emit(&RayReport::new(x, y, &ray), json, RayReport::print)
}

fn run_pick(path: &Path, x: f64, y: f64, bvh: bool, json: bool) -> Result<()> {
    let config = SceneConfig::load(path)?;
    let scene = config.build_scene(bvh)?;
    let camera = config.camera();
    let ray = screen_ray(&camera, x, y)
        .context("camera view-projection matrix is not invertible")?;
    let pick = scene.pick(&ray);
    let report = PickReport::new(&scene, RayReport::new(x, y, &ray), &ray, pick);
    emit(&report, json, PickReport::print)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pick_args() {
        let cli = Cli::parse_from(["glsandbox", "pick", "scene.toml", "--x", "10", "--y", "20.5", "--bvh", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Pick { scene, x, y, bvh } => {
                assert_eq!(scene, PathBuf::from("scene.toml"));
                assert_eq!((x, y), (10.0, 20.5));
                assert!(bvh);
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_pick_report_through_config() {
        let config = SceneConfig::from_toml_str(
            "[viewport]\nwidth = 800\nheight = 600\n[[objects]]\nname = \"box\"\nmesh = \"cube\"",
        )
        .unwrap();
        let scene = config.build_scene(true).unwrap();
        let ray = screen_ray(&config.camera(), 410.0, 290.0).unwrap();
        let report = PickReport::new(&scene, RayReport::new(410.0, 290.0, &ray), &ray, scene.pick(&ray));
        let hit = report.hit.as_ref().unwrap();
        assert_eq!(hit.name, "box");
        assert!((hit.point[2] - 0.5).abs() < 1e-4);

        let corners = hit.corners.unwrap();
        assert!(corners.iter().all(|c| c[2] == 0.5));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["hit"]["name"], "box");
        assert_eq!(value["hit"]["corners"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cull_report_names_plane() {
        let config = SceneConfig::from_toml_str(
            "[[objects]]\nname = \"front\"\nmesh = \"cube\"\n[[objects]]\nname = \"behind\"\nmesh = \"cube\"\ntranslate = [0.0, 0.0, 20.0]",
        )
        .unwrap();
        let scene = config.build_scene(false).unwrap();
        let frustum = extract_frustum(&config.camera().view_proj());
        let report = CullReport::new(&scene, &frustum);
        assert_eq!(report.visible, vec![0]);
        // behind the eye the side planes already reject the box
        assert_eq!(report.objects[1].culled_by, Some("left"));
        assert!(!report.objects[1].visible);
    }

    #[test]
    fn test_bounds_report_empty_scene() {
        let scene = SceneConfig::default().build_scene(false).unwrap();
        let report = BoundsReport::new(&scene);
        assert!(report.objects.is_empty());
        assert!(report.scene.is_none());
    }
}
