//! Text rendering of the view.

use crate::view::View;

const PLACEHOLDER: &str = "Write your creation";

/// Render the whole view: header, prompt box, trigger, and one tile per image.
#[must_use]
pub fn render(view: &View) -> String {
    let mut out = String::new();
    out.push_str("Realpix\n");
    out.push_str("Input a Prompt to Generate Realistic Images Using AI\n\n");

    if view.prompt().is_empty() {
        out.push_str(&format!("> ({PLACEHOLDER})\n"));
    } else {
        out.push_str(&format!("> {}\n", view.prompt()));
    }
    out.push_str(if view.is_busy() { "[ Generating... ]\n" } else { "[ Generate ]\n" });

    for (index, image) in view.images().iter().enumerate() {
        out.push_str(&tile(index, image.approx_len()));
    }
    out
}

fn tile(index: usize, size: usize) -> String {
    format!("\n[{index}] AI Generated {}  ({})  [Download]\n", index + 1, human_size(size))
}

#[allow(clippy::cast_precision_loss)]
fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GeneratedImage;
    use crate::view::{Event, GenerationOutcome};

    fn loaded_view(payloads: &[&str]) -> View {
        let mut view = View::default();
        view.update(Event::PromptEdited("a cat".into()));
        view.update(Event::GenerateRequested);
        view.update(Event::GenerationResolved {
            ticket: 1,
            outcome: GenerationOutcome::Success(
                payloads.iter().map(|p| GeneratedImage::from_base64(p)).collect(),
            ),
        });
        view
    }

    #[test]
    fn empty_view_shows_placeholder_and_no_tiles() {
        let text = render(&View::default());
        assert!(text.contains("(Write your creation)"));
        assert!(text.contains("[ Generate ]"));
        assert!(!text.contains("[Download]"));
    }

    #[test]
    fn busy_view_shows_generating() {
        let mut view = View::default();
        view.update(Event::PromptEdited("a cat".into()));
        view.update(Event::GenerateRequested);
        let text = render(&view);
        assert!(text.contains("> a cat"));
        assert!(text.contains("[ Generating... ]"));
    }

    #[test]
    fn tiles_in_insertion_order() {
        let text = render(&loaded_view(&["AAAA", "BBBB", "CCCC"]));
        let first = text.find("[0] AI Generated 1").unwrap();
        let second = text.find("[1] AI Generated 2").unwrap();
        let third = text.find("[2] AI Generated 3").unwrap();
        assert!(first < second && second < third);
        assert_eq!(text.matches("[Download]").count(), 3);
    }

    #[test]
    fn tile_line_has_label_size_and_control() {
        assert_eq!(tile(0, 70), "\n[0] AI Generated 1  (70 B)  [Download]\n");
    }

    #[test]
    fn render_ends_each_line_with_newline() {
        let text = render(&loaded_view(&["AAAA"]));
        assert!(text.starts_with("Realpix\n"));
        assert!(text.contains("> a cat\n[ Generate ]\n"));
        assert!(text.ends_with("[Download]\n"));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(human_size(70), "70 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
