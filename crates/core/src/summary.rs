/// One rendered line of a lecture summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    /// `## text`
    Heading(String),
    /// `### text`
    Subheading(String),
    /// `- **label**: text` (the colon and text are optional)
    LabeledBullet { label: String, text: Option<String> },
    /// `- text`
    Bullet(String),
    /// `1. text`, kept verbatim
    Numbered(String),
    /// A blank line.
    Spacer,
    Paragraph(String),
}

/// Parse summary markup line by line.
#[must_use]
pub fn parse_summary(text: &str) -> Vec<SummaryBlock> {
    text.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> SummaryBlock {
    if let Some(rest) = line.strip_prefix("## ") {
        return SummaryBlock::Heading(rest.to_owned());
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return SummaryBlock::Subheading(rest.to_owned());
    }
    if let Some(rest) = line.strip_prefix("- **") {
        if let Some(block) = labeled_bullet(rest) {
            return block;
        }
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return SummaryBlock::Bullet(rest.to_owned());
    }
    if is_numbered(line) {
        return SummaryBlock::Numbered(line.to_owned());
    }
    if line.trim().is_empty() {
        return SummaryBlock::Spacer;
    }
    SummaryBlock::Paragraph(line.to_owned())
}

fn labeled_bullet(rest: &str) -> Option<SummaryBlock> {
    let (label, after) = rest.split_once("**")?;
    if label.is_empty() {
        return None;
    }
    let after = after.strip_prefix(':').unwrap_or(after).trim_start();
    Some(SummaryBlock::LabeledBullet {
        label: label.to_owned(),
        text: (!after.is_empty()).then(|| after.to_owned()),
    })
}

fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}
