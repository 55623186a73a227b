pub mod consts;
pub mod error;
pub mod io;
pub mod matching;
pub mod point;
pub mod processed;
pub mod spectral;
