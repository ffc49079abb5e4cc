//! Render command handler

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use taxon_tree::config::Config;
use taxon_tree::core::models::TaxonNode;
use taxon_tree::core::render::svg::render_svg;
use taxon_tree::core::render::{Clock, ManualClock};
use taxon_tree::core::session::{Effect, Event, Session};

/// Default snapshot file name inside the output directory
pub const DEFAULT_FILE_NAME: &str = "tree.svg";

/// What to show in the snapshot
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Taxon to reveal and centre
    pub focus: Option<String>,
    /// Families to reveal and expand
    pub expand: Vec<String>,
    /// Explicit output file
    pub output: Option<PathBuf>,
    /// Viewport width override
    pub width: Option<f64>,
    /// Viewport height override
    pub height: Option<f64>,
}

/// Drive a session offline and write the settled drawing as SVG
///
/// # Errors
///
/// Returns an error if a requested taxon is unknown, or the SVG cannot be
/// rendered or written
pub fn run(
    dataset: &TaxonNode,
    config: &mut Config,
    request: &RenderRequest,
) -> Result<(), Box<dyn Error>> {
    if let Some(width) = request.width {
        config.camera.viewport_width = width;
    }
    if let Some(height) = request.height {
        config.camera.viewport_height = height;
    }

    let svg = render_snapshot(dataset, config, request)?;
    let path = request.output.clone().unwrap_or_else(|| {
        PathBuf::from(&config.paths.output_dir).join(DEFAULT_FILE_NAME)
    });
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, svg)?;
    println!("✓ Tree rendered: {}", path.display());
    Ok(())
}

/// Apply the request to a fresh session and render it once everything settled
///
/// # Errors
///
/// Returns an error if a requested taxon is unknown or templating fails
pub fn render_snapshot(
    dataset: &TaxonNode,
    config: &Config,
    request: &RenderRequest,
) -> Result<String, Box<dyn Error>> {
    let settings = config.engine_settings();
    let settle_ms = settings
        .animation
        .relayout_ms
        .max(settings.animation.camera_ms)
        .max(settings.animation.fit_ms);
    let mut session = Session::new(dataset, settings, ManualClock::default());
    settle(&mut session, settle_ms);

    for name in &request.expand {
        if session.tree().find_by_name(name).is_none() {
            return Err(format!("No taxon named '{name}'").into());
        }
        report(&session.handle(Event::Focus(name.clone())));
        settle(&mut session, settle_ms);
    }

    match &request.focus {
        Some(name) => {
            if session.tree().find_by_name(name).is_none() {
                return Err(format!("No taxon named '{name}'").into());
            }
            report(&session.handle(Event::Focus(name.clone())));
        }
        None => {
            session.handle(Event::FitToContent);
        }
    }
    settle(&mut session, settle_ms);

    logger::info!(
        "Rendering {} visible taxa at scale {:.2}",
        session.layout().visible.len(),
        session.transform().k
    );
    let svg = render_svg(
        session.render(),
        session.transform(),
        session.canvas(),
        &dataset.name,
        session.clock().now_ms(),
    )?;
    Ok(svg)
}

fn settle(session: &mut Session<ManualClock>, settle_ms: u64) {
    session.clock().advance(settle_ms);
    session.handle(Event::Frame);
}

fn report(effects: &[Effect]) {
    for effect in effects {
        if let Effect::ResizeCanvas { height } = effect {
            logger::verbose!("Canvas height now {height:.0}px");
        }
    }
}
