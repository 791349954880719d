pub const LABEL_SEPARATOR: &str = ", ";

/// Build the generation prompt from image labels and the user's note.
pub fn compose(labels: &[String], text: &str) -> String {
    let elements = labels.join(LABEL_SEPARATOR);

    format!(
        "The photo shows: {elements}.\n\
         The person who took it wrote: \"{text}\".\n\
         Using the photo and the note, write a short poetic narrative in the first person, \
         as if you were the one standing in this scene. \
         Keep it to about 50 characters in the language of the note. \
         Make sure the piece ends with a complete sentence and is never cut off."
    )
}
