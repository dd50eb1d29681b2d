/// Example program that lists every exercise's rule set and shows how the verdict changes
/// Run with: cargo run --example rule_walkthrough

use formcheck_lib::core::exercises::{ExerciseRules, PullUp, PushUp, SitUp, Squat, Walk};
use formcheck_lib::{analyze, BodyLandmark, Landmark};

fn describe<R: ExerciseRules>() {
    println!("{}:", R::EXERCISE);
    let required: Vec<&str> = R::REQUIRED_LANDMARKS.iter().map(|l| l.as_str()).collect();
    println!("  Landmarks: {}", required.join(", "));
    match R::ACTIVE_POSITION {
        Some(position) => println!("  Counts a rep in the {} position", position.as_str()),
        None => println!("  No rep counting"),
    }
    for (i, rule) in R::RULES.iter().enumerate() {
        println!("  Rule {} [{}]: {}", i + 1, rule.name, rule.message);
    }
    println!("  Good form: {}", R::GOOD_FORM_MESSAGE);
    println!();
}

fn standing_frame() -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::default(); 33];
    let points = [
        (BodyLandmark::LeftShoulder, 0.50, 0.30),
        (BodyLandmark::LeftHip, 0.50, 0.50),
        (BodyLandmark::LeftKnee, 0.50, 0.70),
        (BodyLandmark::LeftAnkle, 0.50, 0.90),
    ];
    for (landmark, x, y) in points {
        landmarks[landmark.index()] = Landmark::new(x, y);
    }
    landmarks
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Exercise Rule Sets ===\n");

    describe::<PushUp>();
    describe::<Squat>();
    describe::<SitUp>();
    describe::<PullUp>();
    describe::<Walk>();

    println!("=== Squat Walkthrough ===\n");

    let mut landmarks = standing_frame();
    let standing = analyze("squat", Some(&landmarks))?;
    println!("Standing: {}", serde_json::to_string(&standing)?);

    // Bend the knee forward and the hip back into a deep squat
    landmarks[BodyLandmark::LeftKnee.index()] = Landmark::new(0.60, 0.60);
    landmarks[BodyLandmark::LeftHip.index()] = Landmark::new(0.40, 0.62);
    let squatting = analyze("squat", Some(&landmarks))?;
    println!("Squatting: {}", serde_json::to_string(&squatting)?);

    // Cut the frame short of the ankle
    let partial = analyze("squat", Some(&landmarks[..BodyLandmark::LeftAnkle.index()]))?;
    println!("Partial frame: {}", serde_json::to_string(&partial)?);

    println!("\n=== Test Complete ===");
    Ok(())
}
