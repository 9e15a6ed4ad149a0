// This file is an example of how to use the `wave_vision` library.
// The main library entry point is `src/lib.rs`.

fn main() {
    println!("Wave Vision Engine - Example Runner");
    // In a real application, you would create a config, instantiate the
    // pipeline, and feed it frames from a camera here.
    //
    // Example:
    // let config = wave_vision::pipeline::WaveConfig::default();
    // let mut pipeline = WavePipeline::new(config);
    // let frame_bytes = grab_frame_from_camera();
    // if pipeline.wave_detected(&frame_bytes)? {
    //     greet_the_visitor();
    //     pipeline.reset();
    // }
}
