use busline_core::geo::{Bounds, LatLng};
use busline_core::surface::{
    LayerId, LineStyle, MapSurface, MarkerIcon, RotationOrigin, Viewport,
};
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub enum TLayer {
    Line {
        path: Vec<LatLng>,
        style: LineStyle,
    },
    Marker {
        position: LatLng,
        popup: String,
        angle: f64,
        origin: Option<RotationOrigin>,
        opacity: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceCall {
    AddLine(LayerId),
    AddMarker(LayerId),
    Remove(LayerId),
    Move(LayerId),
    Rotate(LayerId, f64),
    Opacity(LayerId, f64),
    FitBounds(Bounds),
    SetView(Viewport),
}

/// Surface that keeps its layers in memory and records every call made on it.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub layers: IndexMap<LayerId, TLayer>,
    pub calls: Vec<SurfaceCall>,
    pub view: Viewport,
    next_id: u64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            layers: IndexMap::new(),
            calls: Vec::new(),
            view: Viewport {
                center: LatLng::new(0.0, 0.0),
                zoom: 1.0,
            },
            next_id: 0,
        }
    }
}

impl RecordingSurface {
    pub fn line_count(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, TLayer::Line { .. }))
            .count()
    }

    pub fn marker_count(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, TLayer::Marker { .. }))
            .count()
    }

    pub fn line_paths(&self) -> Vec<Vec<LatLng>> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                TLayer::Line { path, .. } => Some(path.clone()),
                TLayer::Marker { .. } => None,
            })
            .collect()
    }

    pub fn marker(&self, layer: LayerId) -> Option<&TLayer> {
        self.layers.get(&layer)
    }

    pub fn fitted_bounds(&self) -> Vec<Bounds> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::FitBounds(bounds) => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    fn next_layer(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId::from(self.next_id)
    }
}

impl MapSurface for RecordingSurface {
    fn add_polyline(&mut self, path: &[LatLng], style: LineStyle) -> LayerId {
        let layer = self.next_layer();
        self.layers.insert(
            layer,
            TLayer::Line {
                path: path.to_vec(),
                style,
            },
        );
        self.calls.push(SurfaceCall::AddLine(layer));
        layer
    }

    fn add_marker(&mut self, position: LatLng, _icon: &MarkerIcon, popup: &str) -> LayerId {
        let layer = self.next_layer();
        self.layers.insert(
            layer,
            TLayer::Marker {
                position,
                popup: popup.to_owned(),
                angle: 0.0,
                origin: None,
                opacity: 1.0,
            },
        );
        self.calls.push(SurfaceCall::AddMarker(layer));
        layer
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.shift_remove(&layer);
        self.calls.push(SurfaceCall::Remove(layer));
    }

    fn set_marker_position(&mut self, layer: LayerId, new_position: LatLng) {
        if let Some(TLayer::Marker { position, .. }) = self.layers.get_mut(&layer) {
            *position = new_position;
        }
        self.calls.push(SurfaceCall::Move(layer));
    }

    fn set_marker_rotation(&mut self, layer: LayerId, new_angle: f64, new_origin: RotationOrigin) {
        if let Some(TLayer::Marker { angle, origin, .. }) = self.layers.get_mut(&layer) {
            *angle = new_angle;
            *origin = Some(new_origin);
        }
        self.calls.push(SurfaceCall::Rotate(layer, new_angle));
    }

    fn set_marker_opacity(&mut self, layer: LayerId, new_opacity: f64) {
        if let Some(TLayer::Marker { opacity, .. }) = self.layers.get_mut(&layer) {
            *opacity = new_opacity;
        }
        self.calls.push(SurfaceCall::Opacity(layer, new_opacity));
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.view.center = bounds.center();
        self.calls.push(SurfaceCall::FitBounds(bounds));
    }

    fn set_view(&mut self, viewport: Viewport) {
        self.view = viewport;
        self.calls.push(SurfaceCall::SetView(viewport));
    }

    fn viewport(&self) -> Viewport {
        self.view
    }
}
