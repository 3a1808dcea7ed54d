//! Declarative chart descriptions handed to an external renderer.
//!
//! A `ChartSpec` says what to draw (mark, encodings, tooltip fields); the rows come from the
//! view that built it. `to_vega_lite` joins the two into a Vega-Lite v5 document.

use serde_json::{Map, Value, json};

use crate::colors::ColorMap;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Bar,
    Arc,
    Line,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::Bar => "bar",
            Mark::Arc => "arc",
            Mark::Line => "line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Nominal,
    Quantitative,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Nominal => "nominal",
            FieldType::Quantitative => "quantitative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEncoding {
    pub field: String,
    pub kind: FieldType,
    pub title: Option<String>,
    /// Vega-Lite sort shorthand, e.g. `-y`.
    pub sort: Option<String>,
}

impl FieldEncoding {
    pub fn nominal(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldType::Nominal,
            title: None,
            sort: None,
        }
    }

    pub fn quantitative(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldType::Quantitative,
            title: None,
            sort: None,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn sorted(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    fn to_json(&self) -> Value {
        let mut out = json!({ "field": self.field, "type": self.kind.as_str() });
        if let Some(title) = &self.title {
            out["title"] = json!(title);
        }
        if let Some(sort) = &self.sort {
            out["sort"] = json!(sort);
        }
        out
    }
}

/// Color keyed on the team field with an explicit domain/range so every chart maps a team to
/// the same color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEncoding {
    pub field: String,
    pub domain: Vec<String>,
    pub range: Vec<String>,
    pub legend: bool,
}

impl ColorEncoding {
    pub fn from_color_map(field: &str, colors: &ColorMap) -> Self {
        Self {
            field: field.to_string(),
            domain: colors.domain().into_iter().map(str::to_string).collect(),
            range: colors.range(),
            legend: false,
        }
    }

    fn to_json(&self) -> Value {
        let mut out = json!({
            "field": self.field,
            "type": "nominal",
            "scale": { "domain": self.domain, "range": self.range },
        });
        if !self.legend {
            out["legend"] = Value::Null;
        }
        out
    }
}

/// Dash pattern keyed on a series field. `range[i]` is the (on, off) pattern for
/// `domain[i]`; an empty pattern draws a solid stroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeDashEncoding {
    pub field: String,
    pub legend_title: String,
    pub domain: Vec<String>,
    pub range: Vec<Vec<u32>>,
}

impl StrokeDashEncoding {
    fn to_json(&self) -> Value {
        json!({
            "field": self.field,
            "type": "nominal",
            "scale": { "domain": self.domain, "range": self.range },
            "legend": { "title": self.legend_title },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipField {
    pub field: String,
    pub kind: FieldType,
}

impl TooltipField {
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }

    fn to_json(&self) -> Value {
        json!({ "field": self.field, "type": self.kind.as_str() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encodings {
    pub x: Option<FieldEncoding>,
    pub y: Option<FieldEncoding>,
    pub theta: Option<FieldEncoding>,
    pub color: ColorEncoding,
    pub stroke_dash: Option<StrokeDashEncoding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub mark: Mark,
    /// Overlay point marks on a line.
    pub point: bool,
    pub encoding: Encodings,
    pub tooltip: Vec<TooltipField>,
    pub height: Option<u32>,
}

impl ChartSpec {
    pub fn tooltip_fields(&self) -> Vec<&str> {
        self.tooltip.iter().map(|t| t.field.as_str()).collect()
    }

    pub fn to_vega_lite(&self, values: &[Value]) -> Value {
        let mut encoding = Map::new();
        if let Some(x) = &self.encoding.x {
            encoding.insert("x".to_string(), x.to_json());
        }
        if let Some(y) = &self.encoding.y {
            encoding.insert("y".to_string(), y.to_json());
        }
        if let Some(theta) = &self.encoding.theta {
            encoding.insert("theta".to_string(), theta.to_json());
        }
        encoding.insert("color".to_string(), self.encoding.color.to_json());
        if let Some(dash) = &self.encoding.stroke_dash {
            encoding.insert("strokeDash".to_string(), dash.to_json());
        }
        encoding.insert(
            "tooltip".to_string(),
            Value::Array(self.tooltip.iter().map(TooltipField::to_json).collect()),
        );

        let mark = if self.point {
            json!({ "type": self.mark.as_str(), "point": true })
        } else {
            json!(self.mark.as_str())
        };

        let mut doc = json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": self.title,
            "data": { "values": values },
            "mark": mark,
            "encoding": Value::Object(encoding),
        });
        if let Some(height) = self.height {
            doc["height"] = json!(height);
        }
        doc
    }
}
