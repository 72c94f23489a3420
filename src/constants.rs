//! Global constants for the atelier hosts

/// Native window settings.
#[cfg(not(target_arch = "wasm32"))]
pub mod window {
    /// Title shown before the first frame
    pub const TITLE: &str = "Atelier - Gallery";

    /// Initial inner size in logical pixels
    pub const DEFAULT_SIZE: (u32, u32) = (1200, 800);
}

/// Browser host settings.
#[cfg(target_arch = "wasm32")]
pub mod web {
    /// Class of the overlay root element
    pub const OVERLAY_CLASS: &str = "enlarged-image-overlay";

    /// Class of the sized container inside the overlay
    pub const CONTAINER_CLASS: &str = "enlarged-image-container";

    /// Class of the element that receives drag and wheel input
    pub const WRAPPER_CLASS: &str = "enlarged-image-wrapper";

    /// Class of the thumbnail grid
    pub const GRID_CLASS: &str = "image-grid";
}
