use crate::config::config::{GeometricRule, GeometricRuleConfig};
use crate::modules::ratio::RatioSet;
use crate::pipeline::result::ShapePrediction;

/// GeometricClassifier evaluates the shape rule table over the feature
/// ratios.
///
/// The table is ordered and the first matching rule wins; every input falls
/// through to the OVAL catch-all, so classification is total.
#[derive(Debug, Clone)]
pub struct GeometricClassifier {
    config: GeometricRuleConfig,
}

impl GeometricClassifier {
    pub fn new(config: GeometricRuleConfig) -> Self {
        GeometricClassifier { config }
    }

    pub fn classify(&self, ratios: &RatioSet) -> ShapePrediction {
        let width_height = ratios.width_height();
        let forehead_cheekbone = ratios.forehead_cheekbone();
        let jaw_cheekbone = ratios.jaw_cheekbone();
        let jaw_angle = ratios.jaw_angle();

        for rule in &self.config.rules {
            if rule_matches(rule, width_height, forehead_cheekbone, jaw_cheekbone, jaw_angle) {
                return ShapePrediction {
                    shape: rule.shape,
                    confidence: rule.confidence,
                };
            }
        }

        ShapePrediction {
            shape: self.config.default_shape,
            confidence: self.config.default_confidence,
        }
    }
}

fn rule_matches(
    rule: &GeometricRule,
    width_height: f32,
    forehead_cheekbone: f32,
    jaw_cheekbone: f32,
    jaw_angle: f32,
) -> bool {
    if let Some(band) = rule.width_height {
        if !band.contains(width_height) {
            return false;
        }
    }
    if let Some(band) = rule.forehead_cheekbone {
        if !band.contains(forehead_cheekbone) {
            return false;
        }
    }
    if let Some(band) = rule.jaw_cheekbone {
        if !band.contains(jaw_cheekbone) {
            return false;
        }
    }
    if let Some(threshold) = rule.jaw_angle_above {
        if jaw_angle <= threshold {
            return false;
        }
    }
    if let Some(threshold) = rule.jaw_angle_at_most {
        if jaw_angle > threshold {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::result::FaceShape;

    fn classifier() -> GeometricClassifier {
        GeometricClassifier::new(GeometricRuleConfig::new())
    }

    fn ratios(width_height: f32, forehead: f32, jaw: f32, angle: f32) -> RatioSet {
        RatioSet {
            width_height_ratio: Some(width_height),
            forehead_cheekbone_ratio: Some(forehead),
            jaw_cheekbone_ratio: Some(jaw),
            upper_lower_face_ratio: Some(1.0),
            avg_jaw_angle: Some(angle),
        }
    }

    #[test]
    fn test_every_shape_is_reachable() {
        let classifier = classifier();
        let cases = [
            (ratios(0.95, 1.0, 1.0, 110.0), FaceShape::Round),
            (ratios(0.95, 1.0, 1.0, 95.0), FaceShape::Square),
            (ratios(0.9, 1.2, 0.7, 90.0), FaceShape::Heart),
            (ratios(0.85, 0.8, 0.8, 90.0), FaceShape::Diamond),
            (ratios(0.7, 1.0, 1.0, 90.0), FaceShape::Oblong),
            (ratios(0.8, 1.0, 0.85, 90.0), FaceShape::Oval),
        ];
        for (input, expected) in cases {
            let prediction = classifier.classify(&input);
            assert_eq!(prediction.shape, expected);
        }
    }

    #[test]
    fn test_classifier_is_total_with_bounded_confidence() {
        let classifier = classifier();
        let values = [-3.0_f32, 0.0, 0.5, 0.8, 0.9, 1.0, 1.2, 10.0];
        let angles = [0.0_f32, 90.0, 100.0, 101.0, 180.0];

        for &wh in &values {
            for &fc in &values {
                for &jc in &values {
                    for &angle in &angles {
                        let prediction = classifier.classify(&ratios(wh, fc, jc, angle));
                        assert!(
                            prediction.confidence >= 0.82 && prediction.confidence <= 0.88,
                            "confidence {} out of bounds",
                            prediction.confidence
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_jaw_angle_discriminates_round_from_square() {
        // Identical ratios that satisfy both the ROUND and SQUARE bands;
        // only the 100 degree threshold decides between them.
        let classifier = classifier();

        let round = classifier.classify(&ratios(0.95, 1.0, 1.0, 100.1));
        assert_eq!(round.shape, FaceShape::Round);
        assert!((round.confidence - 0.88).abs() < 1e-6);

        let square = classifier.classify(&ratios(0.95, 1.0, 1.0, 100.0));
        assert_eq!(square.shape, FaceShape::Square);
        assert!((square.confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_empty_ratio_set_uses_consumer_defaults() {
        // Defaults (0.8, 1.0, 1.0, 90) fall outside every band except the
        // OVAL catch-all.
        let prediction = classifier().classify(&RatioSet::default());
        assert_eq!(prediction.shape, FaceShape::Oval);
        assert!((prediction.confidence - 0.82).abs() < 1e-6);
    }
}
