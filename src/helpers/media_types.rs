/// Content-type inference from a URL's file extension
///
/// Pure lookup table for the UI layer; the controller itself never guesses
/// content types. Extensions not in the table yield None, which the UI
/// should treat as unsupported.
pub fn content_type_for_url(url: &str) -> Option<String> {
    let ext = url.rsplit('.').next()?.to_lowercase();
    let category = match ext.as_str() {
        "mkv" | "webm" | "mp4" | "m4v" => "video",
        "m4a" | "ogg" | "aac" | "mp3" | "wav" => "audio",
        "jpeg" | "jpg" | "gif" | "png" | "bmp" | "webp" => "image",
        _ => return None,
    };
    Some(format!("{}/{}", category, ext))
}
