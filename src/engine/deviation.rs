// ==========================================
// 生产偏差看板 - 偏差等级判定
// ==========================================
// 规则: LOW (< 5) / MEDIUM (5 ≤ x < 50) / HIGH (≥ 50) / NaN → UNKNOWN
// 用途: 仅用于展示着色
// ==========================================

use crate::domain::types::DeviationClass;
use serde::{Deserialize, Serialize};

/// 偏差等级阈值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviationThresholds {
    /// MEDIUM 下界（含）
    pub medium_from: f64,
    /// HIGH 下界（含）
    pub high_from: f64,
}

impl Default for DeviationThresholds {
    fn default() -> Self {
        Self {
            medium_from: 5.0,
            high_from: 50.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DeviationClassifier {
    thresholds: DeviationThresholds,
}

impl DeviationClassifier {
    pub fn new(thresholds: DeviationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> DeviationThresholds {
        self.thresholds
    }

    /// 判定偏差等级（全函数，无失败）
    ///
    /// 负偏差按原值比较（-20 → LOW）
    pub fn classify(&self, pct: f64) -> DeviationClass {
        if pct.is_nan() {
            DeviationClass::Unknown
        } else if pct < self.thresholds.medium_from {
            DeviationClass::Low
        } else if pct < self.thresholds.high_from {
            DeviationClass::Medium
        } else {
            DeviationClass::High
        }
    }
}

/// 默认阈值判定
pub fn classify_deviation(pct: f64) -> DeviationClass {
    DeviationClassifier::default().classify(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_deviation(4.99), DeviationClass::Low);
        assert_eq!(classify_deviation(5.0), DeviationClass::Medium);
        assert_eq!(classify_deviation(49.99), DeviationClass::Medium);
        assert_eq!(classify_deviation(50.0), DeviationClass::High);
    }

    #[test]
    fn test_classify_negative_and_infinite() {
        assert_eq!(classify_deviation(-20.0), DeviationClass::Low);
        assert_eq!(classify_deviation(f64::NEG_INFINITY), DeviationClass::Low);
        assert_eq!(classify_deviation(f64::INFINITY), DeviationClass::High);
    }

    #[test]
    fn test_classify_nan_is_unknown() {
        assert_eq!(classify_deviation(f64::NAN), DeviationClass::Unknown);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = DeviationClassifier::new(DeviationThresholds {
            medium_from: 2.0,
            high_from: 10.0,
        });
        assert_eq!(classifier.classify(3.0), DeviationClass::Medium);
        assert_eq!(classifier.classify(10.0), DeviationClass::High);
    }
}
