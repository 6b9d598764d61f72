//! Platform paths used by configuration.

pub mod xdg_root;
