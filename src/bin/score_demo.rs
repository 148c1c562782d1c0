//! Runs a handful of reference profiles through the engine and prints the assessment.

use stepsync::{HealthInput, HealthScoreEngine, ScoringConfig};

const PROFILES: [(&str, f64, f64, f64); 7] = [
    ("Young, Healthy, Active Person", 25.0, 22.0, 4.0),
    ("Middle-aged, Slightly Overweight, Moderate Activity", 35.0, 25.0, 2.0),
    ("Older, Overweight, Low Activity", 45.0, 28.0, 1.0),
    ("Very Young, Underweight, High Activity", 18.0, 18.5, 7.0),
    ("Senior, Obese, No Activity", 65.0, 35.0, 0.0),
    ("Young Adult, Healthy BMI, Moderate Activity", 30.0, 23.0, 3.0),
    ("Middle-aged, Overweight, Regular Activity", 40.0, 26.0, 2.0),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let _ = dotenvy::dotenv();

    let engine = HealthScoreEngine::new(ScoringConfig::load()?)?;
    let t = engine.config().thresholds;
    println!(
        "Difficulty thresholds: easy <= {:.3} < medium <= {:.3} < hard",
        t.easy, t.medium
    );

    for (name, age, bmi, freq) in PROFILES {
        let input = HealthInput::new(age, bmi, freq)?;
        let p = engine.predict(&input);
        println!(
            "\n{name}\n{}\nDifficulty Level: {}\nHealth Score: {:.3}\nConfidence Score: {:.2}%\n\
             Age Score: {:.3} | BMI Score: {:.3} | Workout Score: {:.3}\nRecommendation: {}",
            "-".repeat(50),
            p.difficulty,
            p.health_score,
            p.confidence * 100.0,
            p.components.age_score,
            p.components.bmi_score,
            p.components.workout_score,
            p.recommendation
        );
    }

    println!("\nscore-demo done");
    Ok(())
}
