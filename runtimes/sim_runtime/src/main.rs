// Sim Runtime - headless driver for the jumping navigation technique
//
// Builds a small scene with a rapier ground plane, attaches a viewer rig and
// replays a scripted trigger press/release, logging where the navigation
// node ends up each frame.

mod rig;

use anyhow::Context;
use cgmath::vec3;
use clap::Parser;
use engine::scene::Renderable;
use engine::{Node, Scene};
use serde::Deserialize;
use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};
use tracing::{debug, info};
use vrnav::{
    ControllerState, JumpingNavigation, NavigationInputs, RapierPicker, TeleportConfig, Time,
    TransitionMode,
};

use rig::ViewerRig;

#[derive(Parser)]
#[command(name = "sim_runtime")]
#[command(about = "Headless scripted session for the jumping navigation technique")]
struct Args {
    /// TOML file with [teleport] and [session] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u32>,

    /// Simulated frame rate
    #[arg(long)]
    fps: Option<f32>,

    /// Transition mode (instant or animated)
    #[arg(short, long)]
    mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimConfig {
    teleport: TeleportConfig,
    session: SessionConfig,
}

/// The scripted user: where they aim and when they pull the trigger.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SessionConfig {
    frames: u32,
    fps: f32,
    head_height: f32,
    /// Controller pitch; negative aims at the floor.
    pitch_degrees: f32,
    /// Slow sweep of the controller around the vertical axis.
    yaw_degrees_per_second: f32,
    press_frame: u32,
    release_frame: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            frames: 90,
            fps: 60.0,
            head_height: 1.7,
            pitch_degrees: -20.0,
            yaw_degrees_per_second: 15.0,
            press_frame: 10,
            release_frame: 30,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<SimConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(frames) = args.frames {
        config.session.frames = frames;
    }
    if let Some(fps) = args.fps {
        config.session.fps = fps;
    }
    if let Some(mode) = &args.mode {
        config.teleport.transition_mode = mode
            .parse::<TransitionMode>()
            .context("--mode")?;
    }

    anyhow::ensure!(
        config.session.fps.is_finite() && config.session.fps > 0.0,
        "fps must be positive, got {}",
        config.session.fps
    );
    config.teleport.validate().context("[teleport]")?;
    Ok(config)
}

/// Ground slab with its top face at y = 0 plus a ball to jump onto.
fn build_world(scene: &Scene) -> RapierPicker {
    let mut picker = RapierPicker::new();

    let ground = Node::new("ground");
    scene.root().add_child(&ground);
    picker.add_box(ground.id(), vec3(0.0, -0.5, 0.0), vec3(100.0, 0.5, 100.0));

    let boulder = Node::new("boulder");
    scene.root().add_child(&boulder);
    picker.add_ball(boulder.id(), vec3(1.5, 0.0, -8.0), 1.0);

    info!("world built with {} colliders", picker.collider_count());
    picker
}

fn main() -> anyhow::Result<()> {
    engine::logging::init_logging("VRNAV_LOG");

    let args = Args::parse();
    let config = load_config(&args)?;
    let session = &config.session;

    info!(
        "Starting sim runtime: {} frames at {} fps, {} transitions",
        session.frames, session.fps, config.teleport.transition_mode
    );

    let scene = Scene::new("sim");
    let rig = ViewerRig::new(&scene, session.head_height);
    let picker = Rc::new(build_world(&scene));
    let sensor = Rc::new(RefCell::new(ControllerState::new()));

    let mut navigation = JumpingNavigation::new(config.teleport.clone())?;
    navigation.set_inputs(
        NavigationInputs::builder()
            .scene(scene.clone())
            .picker(picker)
            .navigation_node(rig.navigation.clone())
            .head_node(rig.head.clone())
            .controller_node(rig.controller.clone())
            .controller_sensor(sensor.clone())
            .build()?,
    );
    if config.teleport.enabled {
        navigation.enable(true)?;
    }

    let frame_time = Duration::from_secs_f32(1.0 / session.fps);
    let mut time = Time::default();
    let button = config.teleport.button_index;

    for frame in 0..session.frames {
        time = time.advance(frame_time);

        let yaw = session.yaw_degrees_per_second * time.total.as_secs_f32();
        rig.aim(session.head_height, yaw, session.pitch_degrees);

        if frame == session.press_frame {
            sensor.borrow_mut().set_button(button, true);
        }
        if frame == session.release_frame {
            sensor.borrow_mut().set_button(button, false);
        }

        navigation.update(&time)?;

        let position = rig.navigation.world_position();
        debug!(
            "frame {:>4} phase {:?} ray {:.2} nav ({:.3}, {:.3}, {:.3}) drawn {}",
            frame,
            navigation.phase(),
            navigation.ray_length().unwrap_or_default(),
            position.x,
            position.y,
            position.z,
            scene.render_items().len()
        );
    }

    let head = rig.head.world_position();
    info!(
        "Session finished: navigation at {:?}, head at ({:.3}, {:.3}, {:.3}){}",
        rig.navigation.world_position(),
        head.x,
        head.y,
        head.z,
        if navigation.is_transitioning() {
            ", transition still running"
        } else {
            ""
        }
    );

    Ok(())
}
