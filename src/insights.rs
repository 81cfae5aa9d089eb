use crate::api::SalaryData;

/// Preset topics offered as autocomplete suggestions.
pub const PRESET_TOPICS: [&str; 4] = [
    "Python programming",
    "Data Science",
    "React developer",
    "AWS cloud",
];

/// Keyword table for peer selection, checked in order; first key contained
/// in the lowercased topic wins.
const PEER_TABLE: [(&str, [&str; 4]); 4] = [
    ("python", ["Data Science", "Django", "Flask", "Machine Learning"]),
    ("react", ["Next.js", "Vue", "Angular", "Svelte"]),
    ("aws", ["Azure", "GCP", "DevOps", "Kubernetes"]),
    ("data", ["SQL", "Power BI", "Tableau", "Excel"]),
];

const DEFAULT_PEERS: [&str; 4] = ["React", "Python", "AWS", "SQL"];

/// Base-31 polynomial hash with unsigned 32-bit wraparound. The scoring
/// contract is deterministic output in a bounded range, nothing more.
fn label_hash(label: &str) -> u32 {
    label
        .chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

/// Stable mock demand score in [50, 100].
pub fn demand_score(label: &str) -> u64 {
    u64::from(50 + label_hash(label) % 51)
}

/// Technologies to compare a topic against.
pub fn pick_peers(topic: &str) -> Vec<String> {
    let lower = topic.to_lowercase();
    let peers = PEER_TABLE
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, peers)| peers)
        .unwrap_or(&DEFAULT_PEERS);
    peers.iter().map(|p| p.to_string()).collect()
}

/// Renderable shapes for the demand comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Combo,
}

impl ChartKind {
    pub fn next(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Combo,
            ChartKind::Combo => ChartKind::Bar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Combo => "combo",
        }
    }
}

/// Data behind the demand comparison chart: the topic plus its peers, each
/// scored by the stable hash.
#[derive(Debug, Clone)]
pub struct DemandChart {
    pub labels: Vec<String>,
    pub scores: Vec<u64>,
}

impl DemandChart {
    pub fn build(topic: &str) -> Self {
        let mut labels = vec![topic.to_string()];
        labels.extend(pick_peers(topic));
        let scores = labels.iter().map(|l| demand_score(l)).collect();
        Self { labels, scores }
    }

    /// Score series as (index, value) points for the line shape.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, *s as f64))
            .collect()
    }
}

/// Data behind the salary comparison chart. The fetched median anchors the
/// topic; peer figures are synthesized around it with the same hash, in
/// lakhs (hundred-thousands) with a 0.5 floor.
#[derive(Debug, Clone)]
pub struct SalaryChart {
    pub labels: Vec<String>,
    pub lakhs: Vec<f64>,
}

impl SalaryChart {
    pub fn build(data: &SalaryData) -> Self {
        let mut labels = vec![data.tech.clone()];
        labels.extend(pick_peers(&data.tech));
        let lakhs = labels
            .iter()
            .map(|label| {
                let h = label_hash(label);
                let delta = i64::from(h % 400_000) - 150_000;
                ((data.median + delta) as f64 / 100_000.0).max(0.5)
            })
            .collect();
        Self { labels, lakhs }
    }
}

/// One-line digest shown under the salary chart.
pub fn salary_summary(data: &SalaryData) -> String {
    format!(
        "{} ({}) — median: ₹{} (~{:.2}L), demand index: {}",
        data.tech,
        data.experience,
        format_thousands(data.median),
        data.median as f64 / 100_000.0,
        data.demand_index,
    )
}

/// Thousands separators for whole currency amounts.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DemandIndex;

    #[test]
    fn demand_score_is_stable_and_bounded() {
        for label in ["Python programming", "Rust", "", "Näive UTF-8", "AWS cloud"] {
            let first = demand_score(label);
            assert_eq!(first, demand_score(label));
            assert!((50..=100).contains(&first), "{label} scored {first}");
        }
    }

    #[test]
    fn peers_match_keyword_table() {
        assert_eq!(
            pick_peers("Python programming"),
            ["Data Science", "Django", "Flask", "Machine Learning"]
        );
        // Case-insensitive substring match, not equality.
        assert_eq!(pick_peers("Advanced REACT patterns")[0], "Next.js");
        // Unknown topics fall back to the default set.
        assert_eq!(pick_peers("Quantum basket weaving"), DEFAULT_PEERS);
    }

    #[test]
    fn peer_keyword_order_wins() {
        // Contains both "python" and "data"; the table is checked in order.
        assert_eq!(pick_peers("python for data")[0], "Data Science");
    }

    #[test]
    fn demand_chart_puts_topic_first() {
        let chart = DemandChart::build("AWS cloud");
        assert_eq!(chart.labels[0], "AWS cloud");
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.labels.len(), chart.scores.len());
    }

    #[test]
    fn salary_peers_are_floored_and_deterministic() {
        let data = SalaryData {
            tech: "React developer".into(),
            experience: "mid".into(),
            median: 60_000, // low enough that the negative offsets hit the floor
            demand_index: DemandIndex::Number(72.0),
        };
        let chart = SalaryChart::build(&data);
        assert_eq!(chart.labels.len(), chart.lakhs.len());
        for value in &chart.lakhs {
            assert!(*value >= 0.5);
        }
        assert_eq!(chart.lakhs, SalaryChart::build(&data).lakhs);
    }

    #[test]
    fn summary_formats_median_and_lakhs() {
        let data = SalaryData {
            tech: "aws".into(),
            experience: "senior".into(),
            median: 1_234_567,
            demand_index: DemandIndex::Text("high".into()),
        };
        let line = salary_summary(&data);
        assert!(line.contains("₹1,234,567"));
        assert!(line.contains("(~12.35L)"));
        assert!(line.contains("demand index: high"));
        assert!(line.starts_with("aws (senior)"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(25_000_000), "25,000,000");
    }

    #[test]
    fn chart_kind_cycles_through_all_shapes() {
        let start = ChartKind::Bar;
        assert_eq!(start.next().next().next(), start);
    }
}
