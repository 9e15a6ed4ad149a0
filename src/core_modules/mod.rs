pub mod frame;
pub mod motion_delta;
pub mod preprocessor;
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_frames;
