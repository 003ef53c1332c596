use std::sync::LazyLock;

use regex::Regex;

/// A leading `:code:` followed by whatever is left of the line.
static LEADING_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(:\w+:)(.*)").expect("valid gitmoji regex"));

/// Shorthand codes from the gitmoji set and their glyphs.
const GITMOJIS: &[(&str, &str)] = &[
    (":art:", "🎨"),
    (":zap:", "⚡"),
    (":fire:", "🔥"),
    (":bug:", "🐛"),
    (":ambulance:", "🚑"),
    (":sparkles:", "✨"),
    (":memo:", "📝"),
    (":rocket:", "🚀"),
    (":lipstick:", "💄"),
    (":tada:", "🎉"),
    (":white_check_mark:", "✅"),
    (":lock:", "🔒"),
    (":closed_lock_with_key:", "🔐"),
    (":bookmark:", "🔖"),
    (":rotating_light:", "🚨"),
    (":construction:", "🚧"),
    (":green_heart:", "💚"),
    (":arrow_down:", "⬇️"),
    (":arrow_up:", "⬆️"),
    (":pushpin:", "📌"),
    (":construction_worker:", "👷"),
    (":chart_with_upwards_trend:", "📈"),
    (":recycle:", "♻️"),
    (":heavy_plus_sign:", "➕"),
    (":heavy_minus_sign:", "➖"),
    (":wrench:", "🔧"),
    (":hammer:", "🔨"),
    (":globe_with_meridians:", "🌐"),
    (":pencil2:", "✏️"),
    (":poop:", "💩"),
    (":rewind:", "⏪"),
    (":twisted_rightwards_arrows:", "🔀"),
    (":package:", "📦"),
    (":alien:", "👽"),
    (":truck:", "🚚"),
    (":page_facing_up:", "📄"),
    (":boom:", "💥"),
    (":bento:", "🍱"),
    (":wheelchair:", "♿"),
    (":bulb:", "💡"),
    (":beers:", "🍻"),
    (":speech_balloon:", "💬"),
    (":card_file_box:", "🗃️"),
    (":loud_sound:", "🔊"),
    (":mute:", "🔇"),
    (":busts_in_silhouette:", "👥"),
    (":children_crossing:", "🚸"),
    (":building_construction:", "🏗️"),
    (":iphone:", "📱"),
    (":clown_face:", "🤡"),
    (":egg:", "🥚"),
    (":see_no_evil:", "🙈"),
    (":camera_flash:", "📸"),
    (":alembic:", "⚗️"),
    (":mag:", "🔍"),
    (":label:", "🏷️"),
    (":seedling:", "🌱"),
    (":triangular_flag_on_post:", "🚩"),
    (":goal_net:", "🥅"),
    (":dizzy:", "💫"),
    (":wastebasket:", "🗑️"),
    (":passport_control:", "🛂"),
    (":adhesive_bandage:", "🩹"),
    (":monocle_face:", "🧐"),
    (":coffin:", "⚰️"),
    (":test_tube:", "🧪"),
    (":necktie:", "👔"),
    (":stethoscope:", "🩺"),
    (":bricks:", "🧱"),
    (":technologist:", "🧑‍💻"),
    (":money_with_wings:", "💸"),
    (":thread:", "🧵"),
    (":safety_vest:", "🦺"),
    (":airplane:", "✈️"),
];

/// Glyph for a `:code:` token, if it is part of the gitmoji set.
pub fn glyph_for(code: &str) -> Option<&'static str> {
    GITMOJIS
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, glyph)| *glyph)
}

/// Render the leading shorthand code of a single line.
///
/// `:code: rest` becomes `:code:<glyph> rest` when the code is known and
/// ` rest` when it isn't. Lines without a leading code are returned as-is.
pub fn expand_line(line: &str) -> String {
    let Some(caps) = LEADING_CODE.captures(line) else {
        return line.to_string();
    };

    let code = &caps[1];
    let rest = &caps[2];

    match glyph_for(code) {
        Some(glyph) => format!("{code}{glyph}{rest}"),
        None => {
            log::debug!("Dropping unknown gitmoji code {code}");
            rest.to_string()
        }
    }
}

/// Apply [`expand_line`] to every `\n`-separated line of a model response.
pub fn expand_all(text: &str) -> String {
    text.split('\n').map(expand_line).collect::<Vec<_>>().join("\n")
}
