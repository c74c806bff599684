use yew::prelude::*;

#[derive(Clone, PartialEq, Debug)]
pub struct AnalysisResult {
    pub title: &'static str,
    pub score: u8,
    pub summary: &'static str,
    pub detail: &'static str,
}

// Placeholder content until results come from the analysis service.
pub const PLACEHOLDER_RESULTS: [AnalysisResult; 3] = [
    AnalysisResult {
        title: "Overall sentiment",
        score: 72,
        summary: "Mostly positive across recent sources.",
        detail: "Sample data. Collected from placeholder feeds; not a live measurement.",
    },
    AnalysisResult {
        title: "Trend strength",
        score: 58,
        summary: "Moderate upward movement over the last week.",
        detail: "Sample data. Trend is computed over a fixed seven-day window.",
    },
    AnalysisResult {
        title: "Volatility",
        score: 34,
        summary: "Low day-to-day variance.",
        detail: "Sample data. Variance of daily closes, normalised to 0-100.",
    },
];

#[derive(Properties, PartialEq, Clone)]
pub struct ResultCardProps {
    pub result: AnalysisResult,
    pub position: usize,
    pub total: usize,
    pub expanded: bool,
}

#[function_component]
pub fn ResultCard(props: &ResultCardProps) -> Html {
    let r = &props.result;
    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-height:140px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{ r.title }</h3>
                <span style="font-size:12px; opacity:0.7;">{ format!("{}/{}", props.position + 1, props.total) }</span>
            </div>
            <p style="margin:8px 0; font-size:28px; font-weight:bold;">{ r.score.to_string() }</p>
            <p style="margin:4px 0;">{ r.summary }</p>
            if props.expanded {
                <p style="margin:8px 0 0 0; font-size:12px; line-height:1.4; opacity:0.8;">{ r.detail }</p>
            }
        </div>
    }
}
