#![no_std]
extern crate alloc;

pub mod computing;
pub mod drawing;
pub mod rendering;


#[doc(inline)]
pub use {
    computing::Couple,
    computing::Circle,
    computing::CurveResult,
    computing::GeometryError,
    computing::GeometryResult,
    computing::angle_of,
    computing::circumscribe,
    computing::get_curve,
    computing::solve_circle,
    drawing::CurveConfig,
    drawing::Path,
    drawing::PathSink,
    drawing::PathStep,
    drawing::SweepRule,
    drawing::build_curve,
    drawing::build_curve_with,
    rendering::Canvas,
    rendering::Flattener,
};
