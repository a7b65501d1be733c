/*
 * Native controls backing shell regions.
 */
pub mod panel_handler;
