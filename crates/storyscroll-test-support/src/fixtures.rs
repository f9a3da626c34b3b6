//! Episode and layout fixtures.

use std::collections::BTreeMap;

use storyscroll_content::domain::episode::{Episode, Page, Section};
use storyscroll_core::ids::{PageId, SectionId};
use storyscroll_core::layout::{LayoutSnapshot, MeasuredSection};

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn section(id: u32, text: &str) -> Section {
    Section::new(SectionId(id), vec![text.to_owned()])
}

/// Two pages without cues: page 0 owns sections {0, 1}, page 1 owns {2}.
///
/// Colors: pink, blue, green, white, black. Images: harbor, and a `pink`
/// image that the color table shadows.
#[must_use]
pub fn two_page_episode() -> Episode {
    Episode {
        series_title: "Harbor Lights".to_owned(),
        episode_title: "Low Tide".to_owned(),
        creator: "M. Ito".to_owned(),
        pages: vec![
            Page {
                id: PageId(0),
                sections: vec![
                    section(0, "The tide went out."),
                    section(1, "Nobody noticed."),
                ],
            },
            Page {
                id: PageId(1),
                sections: vec![section(2, "Then the boats came back.")],
            },
        ],
        audio_mapping: table(&[("dance", "https://example.com/lets_dance.mp3")]),
        image_mapping: table(&[("harbor", "harbor.jpg"), ("pink", "pink-petals.png")]),
        color_mapping: table(&[
            ("pink", "#ffc0cb"),
            ("blue", "#4a6cff"),
            ("green", "#3cb371"),
            ("white", "#ffffff"),
            ("black", "#000000"),
        ]),
        default_bg: "white".to_owned(),
        default_filter: None,
        default_text_color: "black".to_owned(),
    }
}

/// [`two_page_episode`] with cues: section 0 plays `dance`, section 2 sets
/// background `harbor`, text color `white`, filter `blue` and sound `gulls`.
#[must_use]
pub fn cued_episode() -> Episode {
    let mut episode = two_page_episode();
    episode
        .audio_mapping
        .insert("gulls".to_owned(), "https://example.com/gulls.mp3".to_owned());
    episode.pages[0].sections[0].music = Some("dance".to_owned());
    let last = &mut episode.pages[1].sections[0];
    last.bg = Some("harbor".to_owned());
    last.color = Some("white".to_owned());
    last.filter = Some("blue".to_owned());
    last.sound = Some("gulls".to_owned());
    episode
}

/// An episode with no pages at all.
#[must_use]
pub fn empty_episode() -> Episode {
    Episode {
        pages: Vec::new(),
        ..two_page_episode()
    }
}

/// A layout with the container at 0 and sections at the given offsets.
#[must_use]
pub fn stacked_layout(offsets: &[(u32, f64)], viewport_height: f64) -> LayoutSnapshot {
    LayoutSnapshot {
        container_top: 0.0,
        sections: offsets
            .iter()
            .map(|&(id, top)| MeasuredSection {
                id: SectionId(id),
                top,
            })
            .collect(),
        scroll_top: 0.0,
        viewport_height,
    }
}

/// Layout for [`two_page_episode`]: sections at 0, 800 and 1600 with a
/// 600px viewport (threshold 300).
#[must_use]
pub fn two_page_layout() -> LayoutSnapshot {
    stacked_layout(&[(0, 0.0), (1, 800.0), (2, 1600.0)], 600.0)
}
