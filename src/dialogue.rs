//! Per-NPC dialogue playback and the on-screen dialogue box it drives.

/// Result of asking the sequencer for the next line.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogueStep {
    /// Display this line; the line index has already moved past it.
    Show(String),
    /// No lines left for this NPC.  The line index has been reset to 0.
    Exhausted,
}

/// Ordered dialogue lines for every NPC plus the position within the
/// current NPC's lines.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogueSequencer {
    lines: Vec<Vec<String>>,
    index: usize,
}

impl DialogueSequencer {
    pub fn new(lines: Vec<Vec<String>>) -> Self {
        Self { lines, index: 0 }
    }

    pub fn npc_count(&self) -> usize { self.lines.len() }
    pub fn line_index(&self) -> usize { self.index }

    /// Lines for `npc`, or an empty slice if the index is out of range.
    pub fn lines_for(&self, npc: usize) -> &[String] {
        self.lines.get(npc).map_or(&[], Vec::as_slice)
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Step through `npc`'s lines.  An out-of-range NPC behaves like one
    /// with no lines at all.
    pub fn advance(&mut self, npc: usize) -> DialogueStep {
        match self.lines_for(npc).get(self.index) {
            Some(line) => {
                let line = line.clone();
                self.index += 1;
                DialogueStep::Show(line)
            }
            None => {
                self.index = 0;
                DialogueStep::Exhausted
            }
        }
    }
}

/// State of the dialogue text box drawn over the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogueBox {
    pub visible: bool,
    pub text: String,
    pub speaker: String,
}

impl DialogueBox {
    pub fn new(speaker: impl Into<String>) -> Self {
        Self { visible: false, text: String::new(), speaker: speaker.into() }
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq() -> DialogueSequencer {
        DialogueSequencer::new(vec![
            vec!["a1".into(), "a2".into()],
            vec!["b1".into()],
        ])
    }

    #[test]
    fn advance_walks_lines_then_exhausts() {
        let mut s = seq();
        assert_eq!(s.advance(0), DialogueStep::Show("a1".into()));
        assert_eq!(s.line_index(), 1);
        assert_eq!(s.advance(0), DialogueStep::Show("a2".into()));
        assert_eq!(s.advance(0), DialogueStep::Exhausted);
        assert_eq!(s.line_index(), 0, "index resets once exhausted");
        assert_eq!(s.advance(1), DialogueStep::Show("b1".into()));
    }

    #[test]
    fn out_of_range_npc_is_exhausted() {
        let mut s = seq();
        assert_eq!(s.advance(7), DialogueStep::Exhausted);
        assert!(s.lines_for(7).is_empty());
    }

    #[test]
    fn box_show_hide() {
        let mut b = DialogueBox::new("Saif");
        assert!(!b.visible);
        b.show("hello");
        assert!(b.visible);
        assert_eq!(b.text, "hello");
        b.hide();
        assert!(!b.visible);
        assert_eq!(b.speaker, "Saif");
    }
}
