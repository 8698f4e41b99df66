// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, TranslateScale};
use peniko::Color;

use super::{
    Entity, EntityKind, LineEnd, Marker, PieMarker, Placement, Registry, check_len,
    check_opt_len, clear_handle,
};
use crate::bounds::Extremes;
use crate::error::SceneError;
use crate::info::Info;
use crate::projection::Projection;
use crate::surface::{PrimitiveId, Surface};

/// Registry kinds a line endpoint may refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A [`Marker`].
    Marker,
    /// A [`PieMarker`].
    PieMarker,
}

impl NodeKind {
    /// Parses a host-supplied kind name.
    ///
    /// Accepts `marker` and `pie_marker`/`pie-marker`; anything else is a
    /// configuration error.
    pub fn from_name(name: &str) -> Result<Self, SceneError> {
        match name {
            "marker" => Ok(Self::Marker),
            "pie_marker" | "pie-marker" => Ok(Self::PieMarker),
            other => Err(SceneError::UnknownNodeKind {
                name: other.to_string(),
            }),
        }
    }

    fn entity_kind(self) -> EntityKind {
        match self {
            Self::Marker => EntityKind::Marker,
            Self::PieMarker => EntityKind::PieMarker,
        }
    }
}

/// Reference to a marker or pie marker by registry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Registry to look in.
    pub kind: NodeKind,
    /// Index within that registry.
    pub index: usize,
}

impl NodeRef {
    /// Refers to marker `index`.
    #[must_use]
    pub const fn marker(index: usize) -> Self {
        Self {
            kind: NodeKind::Marker,
            index,
        }
    }

    /// Refers to pie marker `index`.
    #[must_use]
    pub const fn pie_marker(index: usize) -> Self {
        Self {
            kind: NodeKind::PieMarker,
            index,
        }
    }
}

/// Read access to the registries line endpoints can refer to.
#[derive(Clone, Copy, Debug)]
pub struct Nodes<'a> {
    /// Marker registry.
    pub markers: &'a Registry<Marker>,
    /// Pie marker registry.
    pub pie_markers: &'a Registry<PieMarker>,
}

impl Nodes<'_> {
    /// Domain position of the referenced node, read now.
    pub fn position(&self, node: NodeRef) -> Result<Point, SceneError> {
        let found = match node.kind {
            NodeKind::Marker => self.markers.get(node.index).map(Marker::position),
            NodeKind::PieMarker => self.pie_markers.get(node.index).map(PieMarker::position),
        };
        found.ok_or_else(|| SceneError::NodeOutOfRange {
            kind: node.kind.entity_kind(),
            index: node.index,
            len: match node.kind {
                NodeKind::Marker => self.markers.len(),
                NodeKind::PieMarker => self.pie_markers.len(),
            },
        })
    }
}

/// Source of one endpoint column of a line registry.
#[derive(Clone, Copy, Debug)]
pub enum Endpoints<'a> {
    /// Explicit domain coordinates only.
    Explicit(&'a [Point]),
    /// Node references only.
    Nodes(&'a [NodeRef]),
    /// Both, per line. When a line has both, `prefer_explicit` on
    /// [`LineColumns`] picks the winner.
    Both {
        /// Explicit coordinates, where known.
        coords: &'a [Option<Point>],
        /// Node references, where known.
        nodes: &'a [Option<NodeRef>],
    },
}

impl Endpoints<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Explicit(c) => c.len(),
            Self::Nodes(n) => n.len(),
            Self::Both { coords, .. } => coords.len(),
        }
    }

    fn check(&self, field: &'static str, expected: usize) -> Result<(), SceneError> {
        check_len(EntityKind::Line, field, expected, self.len())?;
        if let Self::Both { nodes, .. } = self {
            check_len(EntityKind::Line, field, expected, nodes.len())?;
        }
        Ok(())
    }

    fn resolve(
        &self,
        line: usize,
        end: LineEnd,
        prefer_explicit: bool,
        nodes: &Nodes<'_>,
    ) -> Result<Point, SceneError> {
        let (coord, node) = match *self {
            Self::Explicit(c) => (Some(c[line]), None),
            Self::Nodes(n) => (None, Some(n[line])),
            Self::Both { coords, nodes } => (coords[line], nodes[line]),
        };
        match (coord, node) {
            (Some(c), Some(_)) if prefer_explicit => Ok(c),
            (_, Some(n)) => nodes.position(n),
            (Some(c), None) => Ok(c),
            (None, None) => Err(SceneError::MissingEndpoint { line, end }),
        }
    }
}

/// A straight line between two domain positions.
///
/// Endpoints given as node references are resolved once, when the line
/// registry is created; later changes to the referenced node do not move
/// the line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    start_placement: Placement,
    end_placement: Placement,
    width: f64,
    color: Color,
    name: String,
    info: Info,
    handle: Option<PrimitiveId>,
}

impl Line {
    /// Resolved domain position of the start.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Resolved domain position of the end.
    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Cached pixel positions of `end`.
    #[must_use]
    pub fn placement(&self, end: LineEnd) -> Placement {
        match end {
            LineEnd::Start => self.start_placement,
            LineEnd::End => self.end_placement,
        }
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stroke color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached info.
    #[must_use]
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Handle of the drawn stroke, once rendered.
    #[must_use]
    pub fn handle(&self) -> Option<PrimitiveId> {
        self.handle
    }
}

impl Entity for Line {
    const KIND: EntityKind = EntityKind::Line;

    fn extremes(&self) -> Extremes {
        Extremes::from_point(self.start).include(self.end)
    }

    fn project(&mut self, projection: &Projection) {
        self.start_placement.project(self.start, projection);
        self.end_placement.project(self.end, projection);
    }

    fn apply_view(&mut self, view: TranslateScale) {
        self.start_placement.apply_view(view);
        self.end_placement.apply_view(view);
    }

    fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        clear_handle(surface, &mut self.handle);
        let points = [self.start_placement.current(), self.end_placement.current()];
        self.handle = Some(surface.stroke_polyline(&points, self.width, self.color));
    }

    fn take_handles(&mut self, out: &mut Vec<PrimitiveId>) {
        out.extend(self.handle.take());
    }
}

/// Column-wise input for creating a `Registry<Line>`.
#[derive(Clone, Copy, Debug)]
pub struct LineColumns<'a> {
    /// Start endpoints; the primary column.
    pub starts: Endpoints<'a>,
    /// End endpoints.
    pub ends: Endpoints<'a>,
    /// Stroke widths in pixels.
    pub widths: &'a [f64],
    /// Stroke colors.
    pub colors: &'a [Color],
    /// Display names.
    pub names: &'a [&'a str],
    /// Attached info; `None` attaches [`Info::None`] to every line.
    pub infos: Option<&'a [Info]>,
    /// When an endpoint has both an explicit coordinate and a node
    /// reference, use the coordinate instead of the node position.
    pub prefer_explicit: bool,
}

impl Registry<Line> {
    /// Replaces the registry contents, resolving every endpoint against `nodes`.
    ///
    /// On any error the registry is left reset.
    pub fn create(
        &mut self,
        columns: &LineColumns<'_>,
        nodes: &Nodes<'_>,
    ) -> Result<(), SceneError> {
        self.reset();
        let n = columns.starts.len();
        let kind = EntityKind::Line;
        columns.starts.check("starts", n)?;
        columns.ends.check("ends", n)?;
        check_len(kind, "widths", n, columns.widths.len())?;
        check_len(kind, "colors", n, columns.colors.len())?;
        check_len(kind, "names", n, columns.names.len())?;
        check_opt_len(kind, "infos", n, columns.infos)?;

        let items = (0..n)
            .map(|i| {
                Ok(Line {
                    start: columns.starts.resolve(
                        i,
                        LineEnd::Start,
                        columns.prefer_explicit,
                        nodes,
                    )?,
                    end: columns
                        .ends
                        .resolve(i, LineEnd::End, columns.prefer_explicit, nodes)?,
                    start_placement: Placement::default(),
                    end_placement: Placement::default(),
                    width: columns.widths[i],
                    color: columns.colors[i],
                    name: columns.names[i].to_string(),
                    info: columns.infos.map(|c| c[i].clone()).unwrap_or_default(),
                    handle: None,
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;
        self.fill(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;
    use crate::registry::MarkerColumns;

    fn markers() -> Registry<Marker> {
        let mut reg = Registry::<Marker>::new();
        reg.create(&MarkerColumns {
            positions: &[Point::new(5.0, 5.0), Point::new(-2.0, 8.0)],
            radii: &[3.0; 2],
            colors: &[css::BLACK; 2],
            names: &["x", "y"],
            infos: None,
        })
        .unwrap();
        reg
    }

    fn one_line(
        starts: Endpoints<'_>,
        ends: Endpoints<'_>,
        prefer_explicit: bool,
        nodes: &Nodes<'_>,
    ) -> Result<Registry<Line>, SceneError> {
        let mut reg = Registry::<Line>::new();
        reg.create(
            &LineColumns {
                starts,
                ends,
                widths: &[1.0],
                colors: &[css::BLACK],
                names: &["l"],
                infos: None,
                prefer_explicit,
            },
            nodes,
        )?;
        Ok(reg)
    }

    #[test]
    fn node_wins_when_explicit_is_not_preferred() {
        let m = markers();
        let pies = Registry::new();
        let nodes = Nodes {
            markers: &m,
            pie_markers: &pies,
        };
        let both = Endpoints::Both {
            coords: &[Some(Point::new(99.0, 99.0))],
            nodes: &[Some(NodeRef::marker(0))],
        };
        let end_coords = [Point::new(0.0, 0.0)];
        let end = Endpoints::Explicit(&end_coords);

        let reg = one_line(both, end, false, &nodes).unwrap();
        assert_eq!(reg.get(0).unwrap().start(), Point::new(5.0, 5.0));

        let reg = one_line(both, end, true, &nodes).unwrap();
        assert_eq!(reg.get(0).unwrap().start(), Point::new(99.0, 99.0));
    }

    #[test]
    fn missing_coordinate_falls_back_to_node_and_vice_versa() {
        let m = markers();
        let pies = Registry::new();
        let nodes = Nodes {
            markers: &m,
            pie_markers: &pies,
        };
        let starts = Endpoints::Both {
            coords: &[None],
            nodes: &[Some(NodeRef::marker(1))],
        };
        let ends = Endpoints::Both {
            coords: &[Some(Point::new(3.0, 4.0))],
            nodes: &[None],
        };
        let reg = one_line(starts, ends, true, &nodes).unwrap();
        let line = reg.get(0).unwrap();
        assert_eq!(line.start(), Point::new(-2.0, 8.0));
        assert_eq!(line.end(), Point::new(3.0, 4.0));
        let e = reg.compute_extremes().unwrap();
        assert_eq!((e.west, e.east, e.south, e.north), (-2.0, 3.0, 4.0, 8.0));
    }

    #[test]
    fn endpoint_without_any_source_is_an_error() {
        let m = markers();
        let pies = Registry::new();
        let nodes = Nodes {
            markers: &m,
            pie_markers: &pies,
        };
        let start_coords = [Point::ORIGIN];
        let starts = Endpoints::Explicit(&start_coords);
        let ends = Endpoints::Both {
            coords: &[None],
            nodes: &[None],
        };
        assert_eq!(
            one_line(starts, ends, false, &nodes).unwrap_err(),
            SceneError::MissingEndpoint {
                line: 0,
                end: LineEnd::End
            }
        );
    }

    #[test]
    fn out_of_range_reference_is_an_error() {
        let m = markers();
        let pies = Registry::new();
        let nodes = Nodes {
            markers: &m,
            pie_markers: &pies,
        };
        let start_nodes = [NodeRef::pie_marker(0)];
        let end_nodes = [NodeRef::marker(0)];
        let starts = Endpoints::Nodes(&start_nodes);
        let ends = Endpoints::Nodes(&end_nodes);
        assert_eq!(
            one_line(starts, ends, false, &nodes).unwrap_err(),
            SceneError::NodeOutOfRange {
                kind: EntityKind::PieMarker,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn node_kind_names() {
        assert_eq!(NodeKind::from_name("marker"), Ok(NodeKind::Marker));
        assert_eq!(NodeKind::from_name("pie-marker"), Ok(NodeKind::PieMarker));
        assert!(matches!(
            NodeKind::from_name("line"),
            Err(SceneError::UnknownNodeKind { .. })
        ));
    }

    #[test]
    fn resolution_is_not_live() {
        let mut m = markers();
        let pies = Registry::new();
        let reg = {
            let nodes = Nodes {
                markers: &m,
                pie_markers: &pies,
            };
            one_line(
                Endpoints::Nodes(&[NodeRef::marker(0)]),
                Endpoints::Nodes(&[NodeRef::marker(1)]),
                false,
                &nodes,
            )
            .unwrap()
        };
        m.create(&MarkerColumns {
            positions: &[Point::new(50.0, 50.0), Point::new(60.0, 60.0)],
            radii: &[3.0; 2],
            colors: &[css::BLACK; 2],
            names: &["x", "y"],
            infos: None,
        })
        .unwrap();
        assert_eq!(reg.get(0).unwrap().start(), Point::new(5.0, 5.0));
    }
}
