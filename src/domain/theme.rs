//! Light/dark preference, resolved in a fixed order:
//! stored preference, then the system preference, then light.
//!
//! The stored side is injected through [`PreferenceStore`]; on the server
//! it is a cookie, see [`CookiePreference`].

pub const THEME_COOKIE: &str = "seof-theme";
const COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeTone {
    #[default]
    Light,
    Dark,
}

impl ThemeTone {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeTone::Light => "light",
            ThemeTone::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches('"') {
            "light" => Some(ThemeTone::Light),
            "dark" => Some(ThemeTone::Dark),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ThemeTone::Light => ThemeTone::Dark,
            ThemeTone::Dark => ThemeTone::Light,
        }
    }
}

pub trait PreferenceStore {
    fn load(&self) -> Option<ThemeTone>;
    fn save(&mut self, tone: ThemeTone);
    fn remove(&mut self);
}

#[derive(Debug)]
pub struct ThemeManager<P: PreferenceStore> {
    store: P,
    preference: Option<ThemeTone>,
    system: ThemeTone,
}

impl<P: PreferenceStore> ThemeManager<P> {
    pub fn new(store: P, system: Option<ThemeTone>) -> Self {
        let preference = store.load();
        Self {
            store,
            preference,
            system: system.unwrap_or_default(),
        }
    }

    pub fn resolved(&self) -> ThemeTone {
        self.preference.unwrap_or(self.system)
    }

    /// Explicit choice; persisted.
    pub fn set(&mut self, tone: ThemeTone) {
        self.store.save(tone);
        self.preference = Some(tone);
    }

    pub fn toggle(&mut self) {
        self.set(self.resolved().opposite());
    }

    /// Forget the explicit choice and follow the system again.
    pub fn clear(&mut self) {
        self.store.remove();
        self.preference = None;
    }

    pub fn into_store(self) -> P {
        self.store
    }
}

/// What the theme form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Set(ThemeTone),
    Toggle,
    FollowSystem,
}

impl ThemeAction {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "toggle" => Some(ThemeAction::Toggle),
            "system" => Some(ThemeAction::FollowSystem),
            other => ThemeTone::parse(other).map(ThemeAction::Set),
        }
    }

    pub fn apply<P: PreferenceStore>(self, manager: &mut ThemeManager<P>) {
        match self {
            ThemeAction::Set(tone) => manager.set(tone),
            ThemeAction::Toggle => manager.toggle(),
            ThemeAction::FollowSystem => manager.clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieChange {
    Set(ThemeTone),
    Remove,
}

/// Preference carried in the `seof-theme` cookie of a request; changes are
/// collected as a `Set-Cookie` value for the response.
#[derive(Debug, Clone, Default)]
pub struct CookiePreference {
    current: Option<ThemeTone>,
    change: Option<CookieChange>,
}

impl CookiePreference {
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let current = header.and_then(|h| {
            h.split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .find(|(name, _)| *name == THEME_COOKIE)
                .and_then(|(_, value)| ThemeTone::parse(value))
        });
        Self {
            current,
            change: None,
        }
    }

    pub fn set_cookie_header(&self) -> Option<String> {
        match self.change.as_ref()? {
            CookieChange::Set(tone) => Some(format!(
                "{THEME_COOKIE}={}; Path=/; Max-Age={COOKIE_MAX_AGE}; SameSite=Lax",
                tone.as_str()
            )),
            CookieChange::Remove => Some(format!("{THEME_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax")),
        }
    }
}

impl PreferenceStore for CookiePreference {
    fn load(&self) -> Option<ThemeTone> {
        self.current
    }

    fn save(&mut self, tone: ThemeTone) {
        self.current = Some(tone);
        self.change = Some(CookieChange::Set(tone));
    }

    fn remove(&mut self) {
        self.current = None;
        self.change = Some(CookieChange::Remove);
    }
}

/// `Sec-CH-Prefers-Color-Scheme` client hint, e.g. `"dark"`.
pub fn system_hint(header: Option<&str>) -> Option<ThemeTone> {
    header.and_then(ThemeTone::parse)
}
