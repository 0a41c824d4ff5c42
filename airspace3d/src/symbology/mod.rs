//! Layer symbology: colours, symbols, renderers and the 3-D transformer.
//!
//! Loaded airspace layers arrive with flat 2-D renderers. The
//! [`SymbolTransformer`] turns them into extruded volumes or swept paths
//! whose size is driven by the altitude rules in
//! [`ExpressionCatalog`](crate::altitude::ExpressionCatalog).

mod color;
mod renderer;
mod symbol;
mod transform;

pub use color::{Color, ColorParseError};
pub use renderer::{
    LinearUnit, Renderer, UniqueValueInfo, ValueExpression, ValueRepresentation, VisualVariable,
};
pub use symbol::{
    EdgeKind, Edges, LineCap, LineJoin, Material, Outline, PathProfile, ProfileRotation, Symbol,
    SymbolLayer3d,
};
pub use transform::{
    EdgeStyle, ExtrusionStyle, MaterialSource, SymbolPolicy, SymbolTransformer,
    DEFAULT_EDGE_SIZE, ROUTE_WIDTH_FACTOR, ROUTE_WIDTH_FIELD,
};
