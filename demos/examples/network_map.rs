// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small rail network on a recording surface.
//!
//! Stations are given as `"lat, lon"` strings, lines either join stations by
//! name (`node`, the default) or carry their own coordinates (`manual`):
//!
//! ```text
//! cargo run -p understory_map_view_demos --example network_map -- manual
//! ```
//!
//! The scene is fitted, then a wheel zoom and a drag are simulated and the
//! resulting on-screen positions are printed.

use std::collections::HashMap;
use std::env;
use std::error::Error;

use kurbo::{Point, Size};
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::filter::LevelFilter;
use understory_map_view::{
    CompoundLineColumns, Endpoints, GestureAction, Info, LineColumns, MarkerColumns, NodeRef,
    PieMarkerColumns, PointerEvent, RecordingSurface, Scene, SceneConfig, Slice,
};
use understory_map_view_demos::parse_lat_lon;

const STATIONS: &[(&str, &str, &str)] = &[
    ("Harbour", "51.4545, -2.5879", "none"),
    ("Mill Lane", "51.4610, -2.5402", "none"),
    ("Castle", "51.4862, -2.5711", "timetable"),
    ("Northgate", "51.5103, -2.5530", "none"),
];

const JUNCTIONS: &[(&str, &str)] = &[("Central", "51.4790, -2.5560")];

const LINES: &[(&str, &str)] = &[
    ("Harbour", "Central"),
    ("Mill Lane", "Central"),
    ("Central", "Castle"),
    ("Castle", "Northgate"),
];

const ROUTE: &[&str] = &[
    "51.4500, -2.6000",
    "51.4700, -2.5950",
    "51.4950, -2.5900",
    "51.5150, -2.5700",
];

fn main() -> Result<(), Box<dyn Error>> {
    // Engine warnings and fit diagnostics arrive as `log` records.
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
    let manual = match env::args().nth(1).as_deref() {
        None | Some("node") => false,
        Some("manual") => true,
        Some(other) => {
            return Err(format!("{other:?} is not a mode; use 'manual' or 'node'").into());
        }
    };

    let stations: Vec<Point> = STATIONS
        .iter()
        .map(|(_, at, _)| parse_lat_lon(at))
        .collect::<Result<_, _>>()?;
    let junctions: Vec<Point> = JUNCTIONS
        .iter()
        .map(|(_, at)| parse_lat_lon(at))
        .collect::<Result<_, _>>()?;
    let route: Vec<Point> = ROUTE
        .iter()
        .map(|at| parse_lat_lon(at))
        .collect::<Result<_, _>>()?;

    let mut by_name: HashMap<&str, (NodeRef, Point)> = HashMap::new();
    for (i, ((name, _, _), at)) in STATIONS.iter().zip(&stations).enumerate() {
        by_name.insert(*name, (NodeRef::marker(i), *at));
    }
    for (i, ((name, _), at)) in JUNCTIONS.iter().zip(&junctions).enumerate() {
        by_name.insert(*name, (NodeRef::pie_marker(i), *at));
    }
    let lookup = |name: &str| {
        by_name
            .get(name)
            .copied()
            .ok_or_else(|| format!("no station named {name:?}"))
    };
    let mut start_nodes = Vec::new();
    let mut end_nodes = Vec::new();
    let mut start_points = Vec::new();
    let mut end_points = Vec::new();
    for (from, to) in LINES {
        let (from_node, from_at) = lookup(*from)?;
        let (to_node, to_at) = lookup(*to)?;
        start_nodes.push(from_node);
        end_nodes.push(to_node);
        start_points.push(from_at);
        end_points.push(to_at);
    }

    let mut surface = RecordingSurface::new();
    let config = SceneConfig::new(Size::new(1024.0, 768.0))
        .with_background(css::WHITE)
        .with_gesture(GestureAction::Zoom, "<Pinch>");
    let mut scene = Scene::new(config, &mut surface);

    let station_names: Vec<&str> = STATIONS.iter().map(|(name, _, _)| *name).collect();
    // Unknown info kinds are attached as `Info::None` with a scene warning.
    let station_infos: Vec<Info> = STATIONS
        .iter()
        .map(|(_, _, kind)| scene.info(kind))
        .collect();
    scene.create_markers(&MarkerColumns {
        positions: &stations,
        radii: &[6.0; 4],
        colors: &[css::CRIMSON; 4],
        names: &station_names,
        infos: Some(station_infos.as_slice()),
    })?;
    scene.create_pie_markers(&PieMarkerColumns {
        positions: &junctions,
        radii: &[10.0],
        colors: &[css::DARK_GRAY],
        names: &["Central"],
        slices: &[vec![
            Slice::new(css::ROYAL_BLUE, 3.0),
            Slice::new(css::ORANGE, 1.0),
        ]],
        infos: None,
    })?;

    let line_names: Vec<String> = LINES.iter().map(|(a, b)| format!("{a}-{b}")).collect();
    let line_names: Vec<&str> = line_names.iter().map(String::as_str).collect();
    let (starts, ends) = if manual {
        (
            Endpoints::Explicit(&start_points),
            Endpoints::Explicit(&end_points),
        )
    } else {
        (Endpoints::Nodes(&start_nodes), Endpoints::Nodes(&end_nodes))
    };
    scene.create_lines(&LineColumns {
        starts,
        ends,
        widths: &[3.0; 4],
        colors: &[Color::from_rgb8(0x33, 0x33, 0x33); 4],
        names: &line_names,
        infos: None,
        prefer_explicit: manual,
    })?;
    scene.create_compound_lines(&CompoundLineColumns {
        paths: &[route],
        widths: &[2.0],
        colors: &[css::SEA_GREEN],
    })?;

    scene.render(&mut surface);
    report("fitted", &scene, &surface);

    scene.handle(
        GestureAction::Zoom,
        PointerEvent::wheel(Point::new(512.0, 384.0), 240.0),
        &mut surface,
    );
    report("zoomed", &scene, &surface);

    scene.handle(
        GestureAction::DragStart,
        PointerEvent::at(Point::new(500.0, 400.0)),
        &mut surface,
    );
    scene.handle(
        GestureAction::DragMotion,
        PointerEvent::at(Point::new(560.0, 380.0)),
        &mut surface,
    );
    scene.drag_end();
    report("dragged", &scene, &surface);

    if let Some(at) = scene.domain_at(Point::new(512.0, 384.0)) {
        println!("centre of view: lat {:.4}, lon {:.4}", at.y, at.x);
    }
    for warning in scene.take_warnings() {
        println!("warning: {warning}");
    }
    Ok(())
}

fn report(label: &str, scene: &Scene, surface: &RecordingSurface) {
    println!(
        "{label}: zoom {:.3}, offset ({:.1}, {:.1}), {} primitives",
        scene.view().zoom(),
        scene.view().offset().x,
        scene.view().offset().y,
        surface.live_count()
    );
    for marker in scene.markers() {
        let at = marker.placement().current();
        println!("  {:<10} ({:7.1}, {:7.1})", marker.name(), at.x, at.y);
    }
}
