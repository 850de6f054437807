//! 歌曲预告解析
//!
//! 从 DJ 口播文本中提取 "next is <title> by <artist>"，
//! 未匹配时从固定曲库中随机挑选一首。

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use super::value_objects::SongRef;

/// 解析失败时的候选曲库 (title, artist)
pub const FALLBACK_CATALOG: &[(&str, &str)] = &[
    ("Blinding Lights", "The Weeknd"),
    ("Shape of You", "Ed Sheeran"),
    ("Dance Monkey", "Tones and I"),
    ("Someone You Loved", "Lewis Capaldi"),
    ("Watermelon Sugar", "Harry Styles"),
];

/// 每个字段可以用 "..."、“...”、'...' 包裹，也可以不带引号；
/// 不带引号的艺人名取到行尾，再由 [`trim_bare_artist`] 截断
static ANNOUNCEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)next\s+is\s+"#,
        r#"(?:"(?P<dq_title>[^"\n]+)"|“(?P<cq_title>[^”\n]+)”|'(?P<sq_title>[^'\n]+)'|(?P<title>[^"“”\n]+?))"#,
        r#"\s+by\s+"#,
        r#"(?:"(?P<dq_artist>[^"\n]+)"|“(?P<cq_artist>[^”\n]+)”|'(?P<sq_artist>[^'\n]+)'|(?P<artist>[^"“”\n]+))"#,
    ))
    .expect("announcement pattern is valid")
});

/// 提取预告歌曲，失败时随机回退
pub fn extract_song(script: &str) -> SongRef {
    extract_song_with_rng(script, &mut rand::rng())
}

/// 同 [`extract_song`]，回退选曲使用指定的随机源
pub fn extract_song_with_rng<R: Rng>(script: &str, rng: &mut R) -> SongRef {
    match parse_announcement(script) {
        Some(song) => song,
        None => {
            let song = fallback_song(rng);
            tracing::debug!(
                fallback = %song,
                "No song announcement found in script, using fallback pick"
            );
            song
        }
    }
}

/// 从候选曲库中挑选一首
pub fn fallback_song<R: Rng>(rng: &mut R) -> SongRef {
    let (title, artist) = FALLBACK_CATALOG[rng.random_range(0..FALLBACK_CATALOG.len())];
    SongRef::new(title, artist)
}

fn parse_announcement(script: &str) -> Option<SongRef> {
    // 模型偶尔会输出 markdown 强调符号
    let cleaned = script.replace('*', "");
    let caps = ANNOUNCEMENT_RE.captures(&cleaned)?;

    let first = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| caps.name(name))
            .map(|m| m.as_str().trim().to_string())
    };

    let title = first(&["dq_title", "cq_title", "sq_title", "title"])?;
    let artist = match first(&["dq_artist", "cq_artist", "sq_artist"]) {
        Some(artist) => artist,
        None => trim_bare_artist(caps.name("artist")?.as_str()),
    };

    if title.is_empty() || artist.is_empty() {
        return None;
    }

    Some(SongRef { title, artist })
}

/// 截断不带引号的艺人名
///
/// - `,` `;` 直接截断
/// - `.` `!` `?` 后面紧跟字符时保留（`P!nk`、`will.i.am`）
/// - 单个大写字母后的 `.` 视为缩写（`Ben E. King`）
/// - `!` `?` 后接小写单词时视为名字的一部分（`Panic! at the Disco`）
fn trim_bare_artist(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut end = chars.len();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' | ';' => {
                end = i;
                break;
            }
            '.' | '!' | '?' => {
                let next = chars.get(i + 1).copied();
                if matches!(next, Some(n) if !n.is_whitespace() && !matches!(n, '.' | '!' | '?')) {
                    continue;
                }
                let rest: String = chars[i + 1..].iter().collect();
                let next_word = rest.trim_start();
                let continues = match c {
                    '.' => is_initial(&chars[..i]) && !next_word.is_empty(),
                    _ => next_word.chars().next().is_some_and(char::is_lowercase),
                };
                if !continues {
                    end = i;
                    break;
                }
            }
            _ => {}
        }
    }

    chars[..end].iter().collect::<String>().trim().to_string()
}

/// 前一个词是否为单个大写字母
fn is_initial(before: &[char]) -> bool {
    let word: Vec<&char> = before
        .iter()
        .rev()
        .take_while(|c| !c.is_whitespace())
        .collect();
    word.len() == 1 && word[0].is_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_fallback(song: &SongRef) -> bool {
        FALLBACK_CATALOG
            .iter()
            .any(|(t, a)| song.title == *t && song.artist == *a)
    }

    #[test]
    fn test_double_quoted_announcement() {
        let song = extract_song(r#"Coming up next is "Blinding Lights" by "The Weeknd"!"#);
        assert_eq!(song, SongRef::new("Blinding Lights", "The Weeknd"));
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let song = extract_song(r#"OK folks, NEXT IS "  Levitating " BY " Dua Lipa  ", enjoy."#);
        assert_eq!(song, SongRef::new("Levitating", "Dua Lipa"));
    }

    #[test]
    fn test_unquoted_fields() {
        let song = extract_song("That's all from me. Up next is Bad Guy by Billie Eilish! Stay tuned.");
        assert_eq!(song, SongRef::new("Bad Guy", "Billie Eilish"));
    }

    #[test]
    fn test_unquoted_punctuation_in_names() {
        let cases = [
            ("Up next is Don't Start Now by Dua Lipa!", ("Don't Start Now", "Dua Lipa")),
            ("Coming up next is Spanish Harlem by Ben E. King. Enjoy!", ("Spanish Harlem", "Ben E. King")),
            ("next is Just Like Heaven by The Cure, so turn it up", ("Just Like Heaven", "The Cure")),
            ("next is High Hopes by Panic! at the Disco!", ("High Hopes", "Panic! at the Disco")),
            ("next is So What by P!nk. Let's go", ("So What", "P!nk")),
            ("next is Yellow by Coldplay... Stay tuned", ("Yellow", "Coldplay")),
            ("next is Respect by Aretha Franklin? You bet!", ("Respect", "Aretha Franklin")),
        ];
        for (script, (title, artist)) in cases {
            assert_eq!(extract_song(script), SongRef::new(title, artist), "script: {:?}", script);
        }
    }

    #[test]
    fn test_trim_bare_artist() {
        assert_eq!(trim_bare_artist("Ben E. King"), "Ben E. King");
        assert_eq!(trim_bare_artist("Ben E."), "Ben E");
        assert_eq!(trim_bare_artist("will.i.am! Party time"), "will.i.am");
        assert_eq!(trim_bare_artist("Queen; what a band"), "Queen");
        assert_eq!(trim_bare_artist("  Adele  "), "Adele");
    }

    #[test]
    fn test_mixed_quotes() {
        let song = extract_song("Next is 'Yellow' by Coldplay.");
        assert_eq!(song, SongRef::new("Yellow", "Coldplay"));

        let song = extract_song("And next is “Hey Jude” by “The Beatles”");
        assert_eq!(song, SongRef::new("Hey Jude", "The Beatles"));

        let song = extract_song(r#"next is "Don't Stop Me Now" by Queen"#);
        assert_eq!(song, SongRef::new("Don't Stop Me Now", "Queen"));
    }

    #[test]
    fn test_markdown_emphasis_ignored() {
        let song = extract_song(r#"Coming up next is **"Flowers"** by **Miley Cyrus**!"#);
        assert_eq!(song, SongRef::new("Flowers", "Miley Cyrus"));
    }

    #[test]
    fn test_announcement_after_long_monologue() {
        let script = "Good morning!\nWhy did the scarecrow win an award? Because he was outstanding in his field.\n\
                      In the news today, markets are up.\nComing up next is \"Someone Like You\" by \"Adele\"!";
        let song = extract_song(script);
        assert_eq!(song, SongRef::new("Someone Like You", "Adele"));
    }

    #[test]
    fn test_missing_phrase_uses_fallback() {
        let scripts = [
            "",
            "Sorry, I'm having technical difficulties. Let's play some music while we fix this!",
            "Here comes a classic by a legend.",
            "next is",
            r#"next is "" by """#,
        ];
        for script in scripts {
            let song = extract_song(script);
            assert!(is_fallback(&song), "unexpected pick {:?} for {:?}", song, script);
        }
    }

    #[test]
    fn test_seeded_fallback_is_deterministic() {
        let a = extract_song_with_rng("no announcement", &mut StdRng::seed_from_u64(7));
        let b = extract_song_with_rng("no announcement", &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(is_fallback(&a));
    }

    #[test]
    fn test_fallback_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let picks: std::collections::HashSet<SongRef> =
            (0..200).map(|_| fallback_song(&mut rng)).collect();
        assert_eq!(picks.len(), FALLBACK_CATALOG.len());
    }
}
