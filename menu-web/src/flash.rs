use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const FLASH_COOKIE: &str = "flash";

/// One-shot confirmation shown on the page a POST redirects to.
///
/// Only the variant code travels in the (signed) cookie; the text is looked
/// up again when the page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    RestaurantCreated,
    RestaurantEdited,
    RestaurantDeleted,
    MenuItemCreated,
    MenuItemEdited,
    MenuItemDeleted,
}

impl Flash {
    const ALL: [Flash; 6] = [
        Flash::RestaurantCreated,
        Flash::RestaurantEdited,
        Flash::RestaurantDeleted,
        Flash::MenuItemCreated,
        Flash::MenuItemEdited,
        Flash::MenuItemDeleted,
    ];

    fn code(self) -> &'static str {
        match self {
            Flash::RestaurantCreated => "restaurant-created",
            Flash::RestaurantEdited => "restaurant-edited",
            Flash::RestaurantDeleted => "restaurant-deleted",
            Flash::MenuItemCreated => "menu-item-created",
            Flash::MenuItemEdited => "menu-item-edited",
            Flash::MenuItemDeleted => "menu-item-deleted",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::RestaurantCreated => "new restaurant created",
            Flash::RestaurantEdited => "restaurant edited",
            Flash::RestaurantDeleted => "restaurant deleted",
            Flash::MenuItemCreated => "new menu item created",
            Flash::MenuItemEdited => "menu item edited",
            Flash::MenuItemDeleted => "menu item deleted",
        }
    }

    /// Queues this message for the next page view.
    pub fn set(self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.add(
            Cookie::build((FLASH_COOKIE, self.code()))
                .path("/")
                .http_only(true),
        )
    }

    /// Pops the pending message, if any. Tampered or unknown cookies are
    /// dropped silently.
    pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
        match jar.get(FLASH_COOKIE) {
            Some(cookie) => {
                let flash = Self::from_code(cookie.value());
                (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
            }
            None => (jar, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn test_set_then_take() {
        let jar = SignedCookieJar::new(Key::from(&[7u8; 64]));

        let jar = Flash::MenuItemEdited.set(jar);
        let (jar, flash) = Flash::take(jar);
        assert_eq!(flash, Some(Flash::MenuItemEdited));

        let (_, flash) = Flash::take(jar);
        assert_eq!(flash, None);
    }

    #[test]
    fn test_codes_round_trip() {
        for flash in Flash::ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("bogus"), None);
    }
}
