//! Per-feature contribution breakdown for linear models.

use std::fmt;

use ndarray::ArrayView1;
use plotters::style::RGBColor;

use crate::partition::Rect;
use crate::plot::{Anchor, Canvas, Layer, Shape};
use crate::repr::LinearModel;

use super::format::{plain, thousands};

/// Errors raised while explaining a prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    #[error("sample has {found} values but the model has {expected} features")]
    SampleLength { expected: usize, found: usize },

    #[error("sample value for `{feature}` is not finite: {value}")]
    NonFiniteSample { feature: String, value: f64 },

    /// A one-hot prefix matched no model column.
    #[error("no columns named `{prefix}_<category>`")]
    EmptyGroup { prefix: String },
}

/// One plain feature's share of the prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub feature: String,
    pub value: f64,
    pub coefficient: f64,
    /// `value × coefficient`.
    pub contribution: f64,
}

/// A one-hot column group collapsed into a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupContribution {
    pub prefix: String,
    /// The first column of the group whose value is 1, if any.
    pub active: Option<ActiveCategory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCategory {
    /// Column name without the `prefix_` part.
    pub category: String,
    pub column: String,
    pub coefficient: f64,
}

impl GroupContribution {
    /// Contribution of the group: the active column's coefficient, or 0.
    pub fn contribution(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |a| a.coefficient)
    }
}

/// Why a linear model predicted what it did for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub features: Vec<Contribution>,
    pub groups: Vec<GroupContribution>,
    pub intercept: f64,
    pub prediction: f64,
}

/// Break the prediction for `sample` into per-feature contributions.
///
/// Columns named `<prefix>_<category>` for a prefix in `one_hot_prefixes` are
/// collapsed into one row per prefix; every other column gets its own row.
/// The prediction always covers all columns.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use treescape::explain::explain;
/// use treescape::repr::LinearModel;
///
/// let model = LinearModel::new(
///     vec!["sqft".into(), "zipcode_98103".into(), "zipcode_98115".into()],
///     array![250.0, 40_000.0, 65_000.0],
///     10_000.0,
/// ).unwrap();
///
/// let why = explain(&model, array![1_000.0, 0.0, 1.0].view(), &["zipcode"]).unwrap();
/// assert_eq!(why.features[0].contribution, 250_000.0);
/// assert_eq!(why.groups[0].active.as_ref().unwrap().category, "98115");
/// assert_eq!(why.prediction, 325_000.0);
/// ```
pub fn explain(
    model: &LinearModel,
    sample: ArrayView1<'_, f64>,
    one_hot_prefixes: &[&str],
) -> Result<Explanation, ExplainError> {
    if sample.len() != model.n_features() {
        return Err(ExplainError::SampleLength {
            expected: model.n_features(),
            found: sample.len(),
        });
    }

    let names = model.feature_names();
    let coefficients = model.coefficients();

    if let Some((i, &value)) = sample.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ExplainError::NonFiniteSample {
            feature: names[i].clone(),
            value,
        });
    }

    let group_of = |name: &str| {
        one_hot_prefixes.iter().position(|prefix| {
            name.strip_prefix(*prefix)
                .is_some_and(|rest| rest.starts_with('_'))
        })
    };

    let mut features = Vec::new();
    let mut groups: Vec<GroupContribution> = one_hot_prefixes
        .iter()
        .map(|prefix| GroupContribution {
            prefix: (*prefix).to_string(),
            active: None,
        })
        .collect();
    let mut group_sizes = vec![0usize; one_hot_prefixes.len()];

    for (i, name) in names.iter().enumerate() {
        let value = sample[i];
        let coefficient = coefficients[i];
        match group_of(name.as_str()) {
            Some(g) => {
                group_sizes[g] += 1;
                let group = &mut groups[g];
                if group.active.is_none() && value == 1.0 {
                    group.active = Some(ActiveCategory {
                        category: name[group.prefix.len() + 1..].to_string(),
                        column: name.clone(),
                        coefficient,
                    });
                }
            }
            None => features.push(Contribution {
                feature: name.clone(),
                value,
                coefficient,
                contribution: value * coefficient,
            }),
        }
    }

    if let Some(g) = group_sizes.iter().position(|&n| n == 0) {
        return Err(ExplainError::EmptyGroup {
            prefix: one_hot_prefixes[g].to_string(),
        });
    }

    let prediction = model.predict(sample);
    tracing::debug!(
        n_features = features.len(),
        n_groups = groups.len(),
        prediction,
        "explained linear prediction"
    );

    Ok(Explanation {
        features,
        groups,
        intercept: model.intercept(),
        prediction,
    })
}

impl Explanation {
    fn n_rows(&self) -> usize {
        self.features.len() + self.groups.len()
    }

    /// `(label, value, coefficient, contribution)` cells for each row.
    fn cells(&self) -> Vec<[String; 4]> {
        let features = self.features.iter().map(|c| {
            [
                format!("{}:", c.feature),
                plain(c.value),
                thousands(c.coefficient),
                thousands(c.contribution),
            ]
        });
        let groups = self.groups.iter().map(|g| match &g.active {
            Some(active) => [
                format!("{}:", g.prefix),
                active.category.clone(),
                thousands(active.coefficient),
                thousands(active.coefficient),
            ],
            None => [
                format!("{}:", g.prefix),
                "none".to_string(),
                "-".to_string(),
                thousands(0.0),
            ],
        });
        features.chain(groups).collect()
    }

    /// Draw the table as text annotations on a fresh axis-free canvas.
    pub fn to_canvas(&self, size: (u32, u32)) -> Canvas {
        let top = (self.n_rows() + 2) as f64;
        let canvas = Canvas::new(size, Rect::new(-1.0, 3.0, 0.0, top + 1.0)).without_axes();
        self.draw_onto(canvas)
    }

    /// Add the table to `canvas`, laid out in data coordinates `x ∈ [-1, 3]`
    /// and `y ∈ [0, rows + 3]`.
    pub fn draw_onto(&self, mut canvas: Canvas) -> Canvas {
        const SIZE: f64 = 18.0;
        const BLACK: RGBColor = RGBColor(0, 0, 0);
        const GREY: RGBColor = RGBColor(128, 128, 128);
        const RED: RGBColor = RGBColor(255, 0, 0);

        let text = |canvas: &mut Canvas, x: f64, y: f64, s: String, bold: bool, color: RGBColor| {
            canvas.push(
                Layer::Annotations,
                None,
                Shape::Text {
                    at: [x, y],
                    text: s,
                    size: SIZE,
                    color,
                    bold,
                    anchor: Anchor::Right,
                },
            );
        };

        let top = (self.n_rows() + 2) as f64;
        text(&mut canvas, 1.5, top, "coefficient".into(), true, BLACK);
        text(&mut canvas, 3.0, top, "value".into(), true, BLACK);

        for (k, [label, value, coefficient, contribution]) in self.cells().into_iter().enumerate() {
            let y = top - 1.0 - k as f64;
            text(&mut canvas, 0.0, y, label, false, BLACK);
            text(&mut canvas, 0.5, y, value, false, BLACK);
            text(&mut canvas, 1.5, y, coefficient, false, BLACK);
            text(&mut canvas, 3.0, y, contribution, false, BLACK);
            canvas.push(
                Layer::Breaks,
                None,
                Shape::Segment {
                    from: [-1.0, y - 0.2],
                    to: [3.0, y - 0.2],
                    color: GREY,
                    width: 1,
                },
            );
        }

        text(&mut canvas, 0.0, 1.0, "intercept:".into(), false, BLACK);
        text(&mut canvas, 3.0, 1.0, thousands(self.intercept), false, BLACK);
        canvas.push(
            Layer::Breaks,
            None,
            Shape::Segment {
                from: [2.0, 0.9],
                to: [3.0, 0.9],
                color: BLACK,
                width: 3,
            },
        );
        text(&mut canvas, 1.5, 0.0, "Prediction:".into(), true, RED);
        text(&mut canvas, 3.0, 0.0, format!("${}", thousands(self.prediction)), true, RED);

        canvas
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let label_width = cells
            .iter()
            .map(|c| c[0].len())
            .chain(["intercept:".len(), "Prediction:".len()])
            .max()
            .unwrap_or(0);
        let prediction = format!("${}", thousands(self.prediction));
        let widths = [
            cells.iter().map(|c| c[1].len()).max().unwrap_or(0),
            cells
                .iter()
                .map(|c| c[2].len())
                .chain(["coefficient".len()])
                .max()
                .unwrap_or(0),
            cells
                .iter()
                .map(|c| c[3].len())
                .chain(["value".len(), thousands(self.intercept).len(), prediction.len()])
                .max()
                .unwrap_or(0),
        ];
        let [w1, w2, w3] = widths;

        writeln!(f, "{:>label_width$}  {:>w1$}  {:>w2$}  {:>w3$}", "", "", "coefficient", "value")?;
        for [label, value, coefficient, contribution] in &cells {
            writeln!(
                f,
                "{label:>label_width$}  {value:>w1$}  {coefficient:>w2$}  {contribution:>w3$}"
            )?;
        }
        writeln!(
            f,
            "{:>label_width$}  {:>w1$}  {:>w2$}  {:>w3$}",
            "intercept:",
            "",
            "",
            thousands(self.intercept)
        )?;
        write!(
            f,
            "{:>label_width$}  {:>w1$}  {:>w2$}  {:>w3$}",
            "Prediction:", "", "", prediction
        )
    }
}
