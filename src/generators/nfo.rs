//! Plain-text NFO release notes.

use super::template::TemplateContext;
use torrentmate_parser::ContentType;

const RULE: &str =
    "░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";

const MOVIE_BODY: &str = "\
▓ GENERAL INFORMATION
▪ Title.............: {title}
▪ Year..............: {year}
▪ Language..........: {languages}

▓ TECHNICAL INFORMATION
▪ Format............: {container}
▪ File size.........: {size}
▪ Runtime...........: {runtime}
▪ Source............: {source}
▪ Resolution........: {resolution} ({dimensions})
▪ Video codec.......: {video_codec}
▪ Bitrate...........: {bitrate}
▪ Audio.............: {audio_codecs}
▪ Subtitles.........: {subtitles}
";

const SERIES_BODY: &str = "\
▓ GENERAL INFORMATION
▪ Title.............: {title}
▪ Year..............: {year}
▪ Episodes..........: {episodes}
▪ Seasons...........: {season_count}
▪ Files.............: {media_files}
▪ Language..........: {languages}

▓ TECHNICAL INFORMATION
▪ Format............: {container}
▪ File size.........: {size}
▪ Runtime...........: {runtime}
▪ Source............: {source}
▪ Resolution........: {resolution} ({dimensions})
▪ Video codec.......: {video_codec}
▪ Bitrate...........: {bitrate}
▪ Audio.............: {audio_codecs}
▪ Subtitles.........: {subtitles}
";

/// Render the NFO document.
pub fn render_nfo(ctx: &TemplateContext, content_type: ContentType) -> String {
    let body = match content_type {
        ContentType::Movie => MOVIE_BODY,
        ContentType::Series => SERIES_BODY,
    };

    let banner = match ctx.get("year") {
        Some(year) if year != super::template::MISSING => {
            ctx.substitute(&format!("{{title_upper}} ({year})"))
        }
        _ => ctx.substitute("{title_upper}"),
    };

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("    {banner}\n"));
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&ctx.substitute(body));
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out
}
