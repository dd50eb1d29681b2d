/// Example program that runs a detector frame through the landmark bridge and analyzer
/// Run with: cargo run --example analyze_frame

use formcheck_lib::core::config::Config;
use formcheck_lib::platform::pose::{DefaultLandmarkBridge, LandmarkBridge};
use formcheck_lib::{BodyLandmark, FormAnalyzer, Landmark};

fn plank_frame() -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::default(); 33];
    let points = [
        (BodyLandmark::LeftShoulder, 0.30, 0.40),
        (BodyLandmark::RightShoulder, 0.35, 0.40),
        (BodyLandmark::LeftElbow, 0.30, 0.50),
        (BodyLandmark::LeftWrist, 0.30, 0.60),
        (BodyLandmark::LeftIndex, 0.30, 0.62),
        (BodyLandmark::RightIndex, 0.36, 0.62),
        (BodyLandmark::LeftHip, 0.50, 0.40),
        (BodyLandmark::LeftKnee, 0.70, 0.40),
    ];
    for (landmark, x, y) in points {
        landmarks[landmark.index()] = Landmark::new(x, y).with_visibility(0.95);
    }
    landmarks
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Frame Analysis Test ===\n");

    let config = Config::default();
    let bridge = DefaultLandmarkBridge::new(&config)?;
    let analyzer = FormAnalyzer::new(&config)?;

    println!("Detector:");
    println!("  {}", bridge.get_model_info());
    println!("  Initialized: {}", bridge.is_initialized());
    println!();

    // Detector output as a client would send it
    let payload = serde_json::json!({ "score": 0.92, "landmarks": plank_frame() });
    let frame_data = serde_json::to_vec(&payload)?;

    println!("Push-up frame ({} bytes):", frame_data.len());
    let verdict = analyzer.analyze_frame(&bridge, &frame_data, Some("push-up"))?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    println!();

    // Same frame, detector unsure of the body
    let weak_payload = serde_json::json!({ "score": 0.2, "landmarks": plank_frame() });
    let weak = serde_json::to_vec(&weak_payload)?;
    println!("Low-confidence frame:");
    let verdict = analyzer.analyze_frame(&bridge, &weak, Some("push-up"))?;
    println!("  {}", verdict.posture.message);
    println!();

    // Unsupported exercise
    println!("Unsupported exercise:");
    match analyzer.analyze_frame(&bridge, &frame_data, Some("lunge")) {
        Ok(verdict) => println!("  Unexpected verdict: {:?}", verdict),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\n=== Test Complete ===");
    Ok(())
}
