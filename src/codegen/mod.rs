//! Artifact generation module

mod class_generator;
mod code_generator;
mod naming;
mod proc_generator;
mod type_mapper;

pub use class_generator::*;
pub use code_generator::*;
pub use naming::*;
pub use proc_generator::*;
pub use type_mapper::*;
