//! BBCode release description for tracker forums.

use super::template::TemplateContext;
use torrentmate_parser::ContentType;

const HEADLINE: &str = "[center][size=18][b]{token}[/b][/size][/center]\n\n";

const MOVIE_INFO: &str = "\
[center][b]Information[/b]
[b]Runtime:[/b] {runtime}
[b]Release year:[/b] {year}[/center]

";

const SERIES_INFO: &str = "\
[center][b]Information[/b]
[b]Runtime:[/b] {runtime}
[b]Aired:[/b] {year}
[b]Episodes:[/b] {episodes}
[b]Seasons:[/b] {season_count}
[b]Files:[/b] {media_files}[/center]

";

const TECHNICAL: &str = "\
[center][b]Release[/b]
[b]Format:[/b] {container}
[b]File size:[/b] {size}
[b]Languages:[/b] {languages}
[b]Source:[/b] {source}
[b]Resolution:[/b] {resolution} ({dimensions})
[b]Video codec:[/b] {video_codec}
[b]Bitrate:[/b] {bitrate}
[b]Audio:[/b] {audio_codecs}
[b]Subtitles:[/b] {subtitles}[/center]
";

/// Render the BBCode description.
pub fn render_bbcode(ctx: &TemplateContext, content_type: ContentType) -> String {
    let info = match content_type {
        ContentType::Movie => MOVIE_INFO,
        ContentType::Series => SERIES_INFO,
    };

    let mut out = ctx.substitute(HEADLINE);
    out.push_str(&ctx.substitute(info));
    out.push_str(&ctx.substitute(TECHNICAL));
    out
}
