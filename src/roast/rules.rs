//! The commentary rule table.
//!
//! Rules are checked top to bottom and the first match wins. The table is an
//! ordered list rather than a map: position decides precedence, and a genre
//! listed twice only ever answers with its first entry.

use crate::types::{ArtistRef, Popularity, Track};

pub const LOW_POPULARITY_THRESHOLD: u32 = 50;
pub const HIGH_POPULARITY_THRESHOLD: u32 = 85;

pub const LOW_POPULARITY_COMMENT: &str = "Guess you’re not making it big anytime soon.";
pub const HIGH_POPULARITY_COMMENT: &str =
    "Must be hard being the center of attention. Try harder to be interesting.";
pub const DEFAULT_COMMENT: &str = "Generic and forgettable—no one will remember this.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Known popularity strictly below the bound
    PopularityBelow(u32),
    /// Known popularity strictly above the bound
    PopularityAbove(u32),
    Genre(&'static str),
    /// The genre is tagged, or the artist is called exactly `name`
    GenreOrArtist {
        genre: &'static str,
        name: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    pub comment: &'static str,
}

impl Rule {
    const fn genre(genre: &'static str, comment: &'static str) -> Self {
        Rule {
            matcher: Matcher::Genre(genre),
            comment,
        }
    }

    const fn genre_or_artist(
        genre: &'static str,
        name: &'static str,
        comment: &'static str,
    ) -> Self {
        Rule {
            matcher: Matcher::GenreOrArtist { genre, name },
            comment,
        }
    }

    pub fn matches(&self, artist: &ArtistRef) -> bool {
        match self.matcher {
            Matcher::PopularityBelow(bound) => {
                matches!(artist.popularity, Popularity::Score(p) if p < bound)
            }
            Matcher::PopularityAbove(bound) => {
                matches!(artist.popularity, Popularity::Score(p) if p > bound)
            }
            Matcher::Genre(genre) => has_genre(artist, genre),
            Matcher::GenreOrArtist { genre, name } => {
                has_genre(artist, genre) || artist.name == name
            }
        }
    }
}

fn has_genre(artist: &ArtistRef, genre: &str) -> bool {
    artist.genres.iter().any(|g| g == genre)
}

#[rustfmt::skip]
pub const RULES: &[Rule] = &[
    Rule { matcher: Matcher::PopularityBelow(LOW_POPULARITY_THRESHOLD), comment: LOW_POPULARITY_COMMENT },
    Rule { matcher: Matcher::PopularityAbove(HIGH_POPULARITY_THRESHOLD), comment: HIGH_POPULARITY_COMMENT },
    Rule::genre("grunge", "Steady on Kurt"),
    Rule::genre("palm desert scene", "Desert rock? More like deserted from good taste."),
    Rule::genre("stoner metal", "Heavy and slow? More like lazy and boring."),
    Rule::genre("stoner rock", "Congratulations, you've mastered the art of being forgettable."),
    Rule::genre("british invasion", "A nostalgia trip that's more annoying than charming."),
    Rule::genre("classic rock", "Classic rock? More like classicly overplayed."),
    Rule::genre("merseybeat", "Trying to relive the Beatles' glory days, huh? Give it up already."),
    Rule::genre("psychedelic rock", "Still tripping on the '60s? Your time machine is broken."),
    Rule::genre("indie rock", "Indie rock: because being obscure is cooler than being good."),
    Rule::genre("indietronica", "Electronic indie? Sounds like a desperate attempt to be different."),
    Rule::genre("irish rock", "If this is what you call 'rock,' I'm not impressed."),
    Rule::genre("alternative metal", "Screaming into a mic doesn't make you deep—just obnoxious."),
    Rule::genre("alternative rock", "Another band trying too hard to be different. How original."),
    Rule::genre("modern alternative rock", "Alternative but still painfully mainstream. Nice try."),
    Rule::genre("album rock", "Long-winded tracks for people who have nothing better to do."),
    Rule::genre("hard rock", "Just more noise for people who can't handle subtlety."),
    Rule::genre("alternative pop rock", "Pop rock with a desperate attempt to sound 'alternative.'"),
    Rule::genre("punk blues", "Bluesy punk—sounds like a mess, and it probably is."),
    Rule::genre("funk metal", "Funky metal? Sounds like a midlife crisis in musical form."),
    Rule::genre("funk rock", "Rocking out with funk? Your genre identity crisis is showing."),
    Rule::genre("permanent wave", "A genre name that sounds like it’s permanently stuck in the past."),
    Rule::genre_or_artist("post-grunge", "Wunderhorse", "Grunge's failed sequel. Try harder next time."),
    Rule::genre("supergroup", "When big names come together to make something mediocre."),
    Rule::genre("birmingham metal", "Birmingham metal? More like Birmingham's attempt at being metal."),
    Rule::genre("uk doom metal", "Doom metal from the UK? A gloomy reminder of what music could be."),
    Rule::genre("australian hip hop", "Aussie hip hop? Cute, but not nearly as good as you think."),
    Rule::genre("australian underground hip hop", "Underground Aussie hip hop? More like underground for a reason."),
    Rule::genre("modern rock", "Modern rock: because blandness is apparently a genre now."),
    Rule::genre("stomp pop", "Pop with a stomping beat—just what the world didn't need."),
    Rule::genre("welsh rock", "Welsh rock? A quirky experiment gone wrong."),
    Rule::genre("candy pop", "Sugar-coated pop that's too sweet to be taken seriously."),
    Rule::genre("pop emo", "Emo pop? All the angst, none of the substance."),
    Rule::genre("pop punk", "Punk for people who want to look rebellious but aren’t."),
    Rule::genre("pov: indie", "Indie perspective? More like 'please don’t listen to me.'"),
    Rule::genre("garage punk", "Garage punk: raw but not in a good way."),
    Rule::genre("australian underground hip hop", "Underground beats from Australia, hiding for a reason."),
    Rule::genre("alternative dance", "Alternative dance: because regular dance is too mainstream."),
    Rule::genre("modern rock", "Rock's not dead, but this is as close as it gets."),
    Rule::genre("neo-synthpop", "Synthpop with pretentious new-age nonsense."),
    Rule::genre("oxford indie", "Indie from Oxford—it's as dull as it sounds."),
    Rule::genre("shimmer pop", "Pop that tries to shine but ends up just being tacky."),
    Rule::genre("electropop", "Electronic pop: because your taste in music is a mystery."),
    Rule::genre("chillwave", "Chillwave? More like 'chill and forgettable.'"),
    Rule::genre("downtempo", "Slow beats for people who need a nap."),
    Rule::genre("trip hop", "Trip hop: a fancy way of saying ‘I’m too cool for upbeat music.’"),
    Rule::genre("swedish electropop", "Swedish electropop—because your musical tastes are both foreign and boring."),
    Rule::genre("swedish synthpop", "Synthpop from Sweden? That's a global disappointment."),
    Rule::genre("indie soul", "Soulful indie? Just more indie nonsense dressed up."),
    Rule::genre("modern alternative pop", "Modern alternative pop—trying too hard to be different."),
    Rule::genre("garage rock", "Garage rock: raw and unrefined, just like your taste."),
    Rule::genre("melbourne punk", "Punk from Melbourne? It's as loud and annoying as you'd expect."),
    Rule::genre("scottish rock", "Scottish rock: bagpipes and bad decisions."),
    Rule::genre("australian garage punk", "Garage punk with an Aussie flair—still a mess."),
    Rule::genre("norwegian hip hop", "Norwegian hip hop? The world didn't need this."),
];

/// First rule that matches the artist, if any.
pub fn matching_rule(artist: &ArtistRef) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(artist))
}

/// Commentary for a single artist. Never empty.
pub fn commentary_for(artist: &ArtistRef) -> &'static str {
    matching_rule(artist)
        .map(|rule| rule.comment)
        .unwrap_or(DEFAULT_COMMENT)
}

/// Commentary for a whole track: one sentence per artist, in artist order,
/// joined with spaces. A track without artists gets the default sentence.
pub fn track_commentary(track: &Track) -> String {
    if track.artists.is_empty() {
        return DEFAULT_COMMENT.to_string();
    }

    track
        .artists
        .iter()
        .map(commentary_for)
        .collect::<Vec<_>>()
        .join(" ")
}
