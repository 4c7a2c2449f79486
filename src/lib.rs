//! Parametric **X3D** primitives: spheres, tilted planes, cones and circles built
//! from a few numbers and returned as typed scene-graph fragments.
//!
//! Every factory in [`primitives`] is a pure function. It validates its input,
//! computes the little geometry it needs (corner rotation, cone base radius,
//! placement offsets) and hands back a [`nodes::Transform`] owned by the caller,
//! ready to be dropped into a larger scene. An optional
//! [`nodes::AppearanceHandle`] is attached by reference, so several primitives
//! can share one look.
//!
//! ```
//! use x3d_prims::nodes::{Appearance, Material};
//! use x3d_prims::primitives::{cone, sphere};
//! use nalgebra::Point3;
//!
//! let red = Appearance::new().with_material(Material::diffuse(1.0, 0.0, 0.0)).into_handle();
//! let ball = sphere(Point3::new(0.0, 1.0, 0.0), 0.5, Some(red.clone())).unwrap();
//! let hat = cone(2.0, 1.0, 0.3, Some(red)).unwrap();
//! assert!(ball.shapes().next().unwrap().shares_appearance_with(hat.shapes().next().unwrap()));
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **x3d-io**: encode node trees as X3D XML
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod nodes;
pub mod primitives;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::PrimitiveError;
pub use primitives::{circle, cone, point3, sphere, tilted_plane};
