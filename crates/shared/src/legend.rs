use crate::period::{PeriodBucket, PERIODS};

pub const LEGEND_HEADING: &str = "Period";

/// Inline style of the legend panel.
pub const LEGEND_PANEL_CSS: &str = "background:white;padding:10px 14px;border-radius:6px;\
box-shadow:0 1px 4px rgba(0,0,0,0.3);line-height:1.8;font-size:13px;";

const SWATCH_CSS: &str =
    "width:12px;height:12px;display:inline-block;border-radius:50%;margin-right:6px";

/// Legend rows, newest period first. Always every bucket, whatever the data holds.
pub fn legend_rows() -> &'static [PeriodBucket] {
    &PERIODS
}

fn row_html(bucket: &PeriodBucket) -> String {
    format!(
        "<i style=\"background:{};{}\"></i> {}<br>",
        bucket.color, SWATCH_CSS, bucket.label
    )
}

/// Inner HTML of the legend control.
pub fn legend_html() -> String {
    let mut html = format!("<strong>{LEGEND_HEADING}</strong><br>");
    for bucket in legend_rows() {
        html.push_str(&row_html(bucket));
    }
    html
}
