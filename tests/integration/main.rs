//! Integration tests.

#[cfg(feature = "npz")]
mod explorer;
mod npy;
#[cfg(feature = "npz")]
mod npz;
mod txt;
