pub mod story;

pub use story::Story;

use std::collections::BTreeMap;

/// Fill in descriptions for stories whose id appears in `descriptions`.
///
/// Stories with unknown ids keep their current description.
pub fn apply_descriptions(stories: &mut [Story], descriptions: &BTreeMap<String, String>) {
    for story in stories.iter_mut() {
        if let Some(description) = descriptions.get(story.id()) {
            story.set_description(description.as_str());
        }
    }
}
