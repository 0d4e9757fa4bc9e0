use serde::ser::{Serialize, SerializeMap, Serializer};

use super::super::domain::{Dimension, DimensionValues};

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 5;
pub const DEFAULT_MATRIX_RATING: u8 = 3;

const WEIGHTS_PROMPT: &str = "请调整你对各维度的重视程度（1-5）";
const RATINGS_PROMPT: &str = "请为每个选项在各维度打分（1-5），未知可留空";

/// Question payload rendered by the frontend for rounds 1 and 2.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    WeightsSliders {
        prompt: String,
        dimensions: Vec<WeightSlider>,
    },
    RatingsMatrix {
        prompt: String,
        options: Vec<String>,
        dimensions: Vec<DimensionLabel>,
        defaults: RatingDefaults,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WeightSlider {
    pub key: Dimension,
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DimensionLabel {
    pub key: Dimension,
    pub label: &'static str,
}

/// Pre-filled matrix values, serialized as an object keyed by option in question order.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDefaults {
    entries: Vec<(String, DimensionValues<u8>)>,
}

impl RatingDefaults {
    pub fn get(&self, option: &str) -> Option<&DimensionValues<u8>> {
        self.entries
            .iter()
            .find(|(name, _)| name == option)
            .map(|(_, values)| values)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RatingDefaults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (option, values) in &self.entries {
            map.serialize_entry(option, values)?;
        }
        map.end()
    }
}

const fn slider_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Impact => "长期收益/成长",
        Dimension::Cost => "成本（时间/金钱/精力）",
        Dimension::Risk => "风险（失败/后悔）",
        Dimension::Reversibility => "可逆性（能否回头）",
    }
}

const fn slider_default(dimension: Dimension) -> u8 {
    match dimension {
        Dimension::Impact => 3,
        Dimension::Cost => 2,
        Dimension::Risk => 2,
        Dimension::Reversibility => 1,
    }
}

const fn matrix_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Impact => "长期收益/成长（越高越好）",
        Dimension::Cost => "成本（越高=越贵/越累）",
        Dimension::Risk => "风险（越高=越危险）",
        Dimension::Reversibility => "可逆性（越高=越能回头）",
    }
}

pub fn weights_sliders_question() -> Question {
    Question::WeightsSliders {
        prompt: WEIGHTS_PROMPT.to_string(),
        dimensions: Dimension::ALL
            .into_iter()
            .map(|dimension| WeightSlider {
                key: dimension,
                label: slider_label(dimension),
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                default: slider_default(dimension),
            })
            .collect(),
    }
}

pub fn ratings_matrix_question(options: &[String]) -> Question {
    Question::RatingsMatrix {
        prompt: RATINGS_PROMPT.to_string(),
        options: options.to_vec(),
        dimensions: Dimension::ALL
            .into_iter()
            .map(|dimension| DimensionLabel {
                key: dimension,
                label: matrix_label(dimension),
            })
            .collect(),
        defaults: RatingDefaults {
            entries: options
                .iter()
                .map(|option| {
                    (
                        option.clone(),
                        DimensionValues::from_fn(|_| DEFAULT_MATRIX_RATING),
                    )
                })
                .collect(),
        },
    }
}
