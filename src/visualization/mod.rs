pub mod planetsim_vis2d;
pub mod planetsim_headless;
