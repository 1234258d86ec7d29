//! Report rendering for the recommendation dashboard.
//!
//! Two cosmetic styles render the same facts: `plain` prints labelled
//! lines, `cards` draws boxed sections and a BMI range bar. All
//! presentation rounding happens here; the dispatcher hands over raw
//! model outputs.

use crate::types::vitals::{HydrationStatus, Recommendation};
use serde::Deserialize;

/// Presentation style for the rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// Labelled lines, one fact per line
    Plain,
    /// Boxed sections with a BMI range bar
    #[default]
    Cards,
}

/// Inner width of a card box
const CARD_WIDTH: usize = 56;

/// BMI bar range, matching the original dashboard's chart
const BAR_MIN: f64 = 10.0;
const BAR_MAX: f64 = 40.0;

/// Render a recommendation into a displayable report
pub fn render(recommendation: &Recommendation, style: ReportStyle) -> String {
    match style {
        ReportStyle::Plain => render_plain(recommendation),
        ReportStyle::Cards => render_cards(recommendation),
    }
}

fn hydration_line(recommendation: &Recommendation) -> &'static str {
    match recommendation.hydration.status {
        HydrationStatus::Sufficient => "Your intake meets or exceeds the recommendation.",
        HydrationStatus::Insufficient => "Your intake is below the recommended volume.",
    }
}

fn nutrition_lines(recommendation: &Recommendation) -> [String; 2] {
    let p = &recommendation.prediction;
    [
        format!("Calories: {:.0} kcal", p.calories.round()),
        format!(
            "Protein: {:.0} g | Fat: {:.0} g | Carbs: {:.0} g",
            p.protein.round(),
            p.fat.round(),
            p.carb.round()
        ),
    ]
}

fn exercise_lines(recommendation: &Recommendation) -> [String; 3] {
    let p = &recommendation.prediction;
    [
        format!("Cardio: {}", p.cardio),
        format!("Strength training: {}", p.strength),
        format!("Mobility & stretching: {}", p.mobility),
    ]
}

fn hydration_lines(recommendation: &Recommendation) -> [String; 3] {
    let h = &recommendation.hydration;
    [
        format!(
            "You reported: {} cups (~{:.0} ml)",
            h.reported_cups, h.reported_ml
        ),
        format!(
            "Recommended: ~{} cups (~{:.0} ml) per day",
            h.recommended_cups, h.recommended_ml
        ),
        hydration_line(recommendation).to_string(),
    ]
}

fn bmi_line(recommendation: &Recommendation) -> String {
    format!(
        "Your BMI: {:.1} ({})",
        recommendation.bmi.value,
        recommendation.bmi.category.label()
    )
}

fn render_plain(recommendation: &Recommendation) -> String {
    let mut out = String::new();

    out.push_str("AI Health & Diet Recommender\n");
    out.push_str(&format!(
        "Generated {}\n\n",
        recommendation.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str("Daily Nutrition Targets\n");
    for line in nutrition_lines(recommendation) {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nPersonalized Exercise Plan\n");
    for line in exercise_lines(recommendation) {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nHydration\n");
    for line in hydration_lines(recommendation) {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nBMI\n");
    out.push_str(&format!("  {}\n", bmi_line(recommendation)));

    out
}

fn render_cards(recommendation: &Recommendation) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "AI Health & Diet Recommender — generated {}\n\n",
        recommendation.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&card(
        "DAILY NUTRITION TARGETS",
        &nutrition_lines(recommendation),
    ));
    out.push_str(&card(
        "PERSONALIZED EXERCISE PLAN",
        &exercise_lines(recommendation),
    ));
    out.push_str(&card("HYDRATION", &hydration_lines(recommendation)));

    let bmi_lines = [
        bmi_line(recommendation),
        bmi_marker(recommendation.bmi.value, CARD_WIDTH),
        bmi_bar(CARD_WIDTH),
        bmi_axis(CARD_WIDTH),
    ];
    out.push_str(&card("BMI", &bmi_lines));

    out
}

/// One boxed section
fn card(title: &str, lines: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!("╔{}╗\n", "═".repeat(CARD_WIDTH + 2)));
    out.push_str(&format!("║ {:<width$} ║\n", title, width = CARD_WIDTH));
    out.push_str(&format!("╠{}╣\n", "═".repeat(CARD_WIDTH + 2)));
    for line in lines {
        out.push_str(&format!("║ {:<width$} ║\n", line, width = CARD_WIDTH));
    }
    out.push_str(&format!("╚{}╝\n", "═".repeat(CARD_WIDTH + 2)));

    out
}

fn bar_column(value: f64, width: usize) -> usize {
    let fraction = (value - BAR_MIN) / (BAR_MAX - BAR_MIN);
    ((fraction * width as f64) as usize).min(width - 1)
}

/// Marker line pointing at the profile's BMI on the bar below
fn bmi_marker(bmi: f64, width: usize) -> String {
    let column = bar_column(bmi.clamp(BAR_MIN, BAR_MAX), width);
    format!("{}▼", " ".repeat(column))
}

/// The BMI range bar: one shaded segment per category
fn bmi_bar(width: usize) -> String {
    (0..width)
        .map(|i| {
            let bmi = BAR_MIN + (BAR_MAX - BAR_MIN) * (i as f64 + 0.5) / width as f64;
            if bmi >= 30.0 {
                '█'
            } else if bmi >= 25.0 {
                '▓'
            } else if bmi >= 18.5 {
                '▒'
            } else {
                '░'
            }
        })
        .collect()
}

/// Axis labels under the bar
fn bmi_axis(width: usize) -> String {
    let mut axis = vec![' '; width];

    for (value, label) in [(BAR_MIN, "10"), (18.5, "18.5"), (25.0, "25"), (30.0, "30")] {
        let column = bar_column(value, width);
        for (i, ch) in label.chars().enumerate() {
            if column + i < width {
                axis[column + i] = ch;
            }
        }
    }

    let end = "40";
    for (i, ch) in end.chars().enumerate() {
        axis[width - end.len() + i] = ch;
    }

    axis.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inference::PredictionResult;
    use crate::types::profile::{ExerciseLevel, Gender, UserProfile};

    fn recommendation() -> Recommendation {
        let profile = UserProfile {
            weight_kg: 70.0,
            height_cm: 170.0,
            age: 25,
            gender: Gender::Female,
            exercise_level: ExerciseLevel::Moderate,
            water_cups: 6,
        };

        PredictionResult {
            calories: 2185.4,
            protein: 118.6,
            fat: 71.2,
            carb: 247.9,
            cardio: "30 min jog".to_string(),
            strength: "full body, 3x/week".to_string(),
            mobility: "10 min stretching daily".to_string(),
        }
        .to_recommendation(&profile)
    }

    #[test]
    fn test_plain_report_sections_and_rounding() {
        let report = render(&recommendation(), ReportStyle::Plain);

        assert!(report.contains("Daily Nutrition Targets"));
        assert!(report.contains("Calories: 2185 kcal"));
        assert!(report.contains("Protein: 119 g | Fat: 71 g | Carbs: 248 g"));
        assert!(report.contains("Cardio: 30 min jog"));
        assert!(report.contains("You reported: 6 cups (~1500 ml)"));
        assert!(report.contains("Recommended: ~8 cups (~2100 ml) per day"));
        assert!(report.contains("below the recommended volume"));
        assert!(report.contains("Your BMI: 24.2 (Normal weight)"));
    }

    #[test]
    fn test_cards_report_renders_the_same_facts() {
        let plain = render(&recommendation(), ReportStyle::Plain);
        let cards = render(&recommendation(), ReportStyle::Cards);

        for fact in [
            "Calories: 2185 kcal",
            "Cardio: 30 min jog",
            "Recommended: ~8 cups (~2100 ml) per day",
            "Your BMI: 24.2 (Normal weight)",
        ] {
            assert!(plain.contains(fact), "plain missing {:?}", fact);
            assert!(cards.contains(fact), "cards missing {:?}", fact);
        }
    }

    #[test]
    fn test_cards_report_has_bmi_bar_and_marker() {
        let cards = render(&recommendation(), ReportStyle::Cards);

        assert!(cards.contains('▼'));
        assert!(cards.contains('░'));
        assert!(cards.contains('█'));
        assert!(cards.contains("18.5"));
    }

    #[test]
    fn test_bmi_marker_tracks_value() {
        // BMI 10 sits at the left edge, BMI 40 at the right
        assert_eq!(bmi_marker(10.0, 56), "▼");
        assert!(bmi_marker(40.0, 56).ends_with('▼'));
        assert_eq!(bmi_marker(40.0, 56).chars().count(), 56);

        let mid = bmi_marker(25.0, 56).chars().count();
        assert!(mid > 20 && mid < 40);
    }

    #[test]
    fn test_sufficient_hydration_wording() {
        let mut rec = recommendation();
        rec.hydration.reported_cups = 9;
        rec.hydration.status = HydrationStatus::Sufficient;

        let report = render(&rec, ReportStyle::Plain);
        assert!(report.contains("meets or exceeds"));
    }
}
