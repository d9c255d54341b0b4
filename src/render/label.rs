use crate::outline::Outline;

/// Rewrites the heading lines of `lines` with the labels from `outline`.
///
/// Each heading becomes `markers + ' ' + [label + ' '] + content`; every
/// other line is copied unchanged.
pub fn render<S: AsRef<str>>(lines: &[S], outline: &Outline, marker: char) -> Vec<String> {
    let mut out: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    for entry in outline {
        let mut line = String::with_capacity(
            entry.level * marker.len_utf8() + entry.number.len() + entry.content.len() + 2,
        );
        line.extend(std::iter::repeat(marker).take(entry.level));
        line.push(' ');
        if !entry.number.is_empty() {
            line.push_str(&entry.number);
            line.push(' ');
        }
        line.push_str(&entry.content);
        out[entry.position] = line;
    }
    out
}
