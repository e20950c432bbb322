use std::fmt;
use std::io::Write;

use lantern_status::{Color, Dirty, Element, Icon, StatusSurface};

/// Surface that prints one line per call.
pub struct PrintSurface<W> {
	out: W,
	failed: bool,
}

impl<W: Write> PrintSurface<W> {
	pub fn new(out: W) -> Self {
		Self { out, failed: false }
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn line(&mut self, args: fmt::Arguments<'_>) {
		if self.failed {
			return;
		}
		if let Err(error) = writeln!(self.out, "{args}") {
			self.failed = true;
			tracing::warn!(%error, "Surface output closed");
		}
	}
}

fn color(color: Option<Color>) -> String {
	color.map_or_else(|| "default".to_string(), |c| c.to_string())
}

impl<W: Write> StatusSurface for PrintSurface<W> {
	fn set_text(&mut self, element: Element, text: &str) {
		self.line(format_args!("text {} {text:?}", element.as_str()));
	}

	fn set_icon(&mut self, element: Element, icon: Icon, tint: Option<Color>) {
		self.line(format_args!("icon {} {} {}", element.as_str(), icon.name(), color(tint)));
	}

	fn set_visible(&mut self, element: Element, visible: bool) {
		let verb = if visible { "show" } else { "hide" };
		self.line(format_args!("{verb} {}", element.as_str()));
	}

	fn set_accent(&mut self, element: Element, accent: Color) {
		self.line(format_args!("accent {} {accent}", element.as_str()));
	}

	fn set_background(&mut self, background: Option<Color>) {
		self.line(format_args!("background {}", color(background)));
	}

	fn request_repaint(&mut self, dirty: Dirty) {
		let _ = self.out.flush();
		tracing::trace!(?dirty, "Repaint");
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn prints_one_line_per_call() {
		let mut surface = PrintSurface::new(Vec::new());
		surface.set_visible(Element::Bar, true);
		surface.set_text(Element::Filetype, "C++");
		surface.set_icon(Element::LintErrors, Icon::Bad, Some(Color::LINT_ERROR));
		surface.set_accent(Element::ModeLabel, Color::rgb(0x2a, 0xbc, 0xb4));
		surface.set_background(None);

		let out = String::from_utf8(surface.into_inner()).unwrap();
		assert_eq!(
			out,
			"show bar\n\
			 text filetype \"C++\"\n\
			 icon lint_errors bad #cc3e44\n\
			 accent mode_label #2abcb4\n\
			 background default\n"
		);
	}
}
