//! Cross-module tests for the viewer.
//!
//! These drive the viewer, the navigation controller and the clipboard
//! exporter together the way a page host does.

mod property_tests;
mod scenario_tests;
