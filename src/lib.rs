//! Interactive geometry sketching engine.
//!
//! This crate owns the logic of a figure-sketching canvas: translating raw
//! pointer events into committed drawing items, snapping new points onto
//! existing geometry, measuring lengths and angles live while drawing, and
//! decomposing the committed segment graph into classified shapes (lines,
//! triangles, polygons) on demand. The host layer is responsible only for
//! wiring its event source to the engine, driving the autopan tick, and
//! rendering the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`]: per-tool pointer dispatch |
//! | [`doc`] | Drawing items, the committed store, and undo/redo history |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Tool selection and the gesture state machine |
//! | [`geom`] | Point snapping, distances, and angle computation |
//! | [`angle`] | Clockwise arm ordering and per-vertex angle emission |
//! | [`hit`] | Endpoint hit-testing for the select tool |
//! | [`shapes`] | Cycle decomposition of the segment graph |
//! | [`autopan`] | Edge-band detection and the viewport autopan loop |
//! | [`render`] | Renderer boundary, graphics cache, label placement |
//! | [`consts`] | Shared numeric constants (snap ratios, zoom limits, etc.) |

pub mod angle;
pub mod autopan;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod shapes;
