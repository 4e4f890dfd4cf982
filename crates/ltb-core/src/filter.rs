use crate::{config::Config, domain::Ad};

/// Acceptance rules for one ad.
///
/// Constructed from `Config` and passed into whatever produces ads; no
/// process-wide constants.
#[derive(Clone, Debug)]
pub struct FilterRules {
    pub city: String,
    pub max_price: u64,
    pub min_rooms: u32,
    pub max_rooms: u32,
    pub owner_only: bool,
}

impl FilterRules {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            city: cfg.city_name.clone(),
            max_price: cfg.max_price,
            min_rooms: cfg.min_rooms,
            max_rooms: cfg.max_rooms,
            owner_only: cfg.owner_only,
        }
    }

    /// All conditions must hold; any single failure rejects the ad.
    pub fn accepts(&self, ad: &Ad) -> bool {
        if ad.city != self.city {
            return false;
        }
        if ad.district.is_none() {
            return false;
        }

        match ad.rooms {
            Some(rooms) if rooms >= self.min_rooms && rooms <= self.max_rooms => {}
            _ => return false,
        }

        match ad.price {
            Some(price) if price > 0 && price <= self.max_price => {}
            _ => return false,
        }

        if ad.phone.is_none() {
            return false;
        }
        if ad.url.is_empty() {
            return false;
        }
        if ad.image_urls.is_empty() {
            return false;
        }

        if self.owner_only && ad.is_owner != Some(true) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> FilterRules {
        FilterRules {
            city: "Бишкек".to_string(),
            max_price: 50_000,
            min_rooms: 1,
            max_rooms: 2,
            owner_only: true,
        }
    }

    fn passing_ad() -> Ad {
        Ad {
            id: "101".to_string(),
            title: "Сдается квартира".to_string(),
            city: "Бишкек".to_string(),
            district: Some("Центр".to_string()),
            rooms: Some(2),
            price: Some(45_000),
            currency: Some("KGS".to_string()),
            is_owner: Some(true),
            phone: Some("+996700000000".to_string()),
            url: "http://ad/101".to_string(),
            image_urls: vec!["http://x/1.jpg".to_string()],
        }
    }

    #[test]
    fn accepts_a_fully_qualified_ad() {
        assert!(rules().accepts(&passing_ad()));
    }

    #[test]
    fn rejects_wrong_city() {
        let mut ad = passing_ad();
        ad.city = "Ош".to_string();
        assert!(!rules().accepts(&ad));
    }

    #[test]
    fn rejects_missing_district() {
        let mut ad = passing_ad();
        ad.district = None;
        assert!(!rules().accepts(&ad));
    }

    #[test]
    fn rooms_boundaries_are_inclusive() {
        let mut ad = passing_ad();
        ad.rooms = Some(1);
        assert!(rules().accepts(&ad));
        ad.rooms = Some(2);
        assert!(rules().accepts(&ad));
        ad.rooms = Some(0);
        assert!(!rules().accepts(&ad));
        ad.rooms = Some(3);
        assert!(!rules().accepts(&ad));
        ad.rooms = None;
        assert!(!rules().accepts(&ad));
    }

    #[test]
    fn rejects_missing_zero_or_excessive_price() {
        let mut ad = passing_ad();
        ad.price = None;
        assert!(!rules().accepts(&ad));
        ad.price = Some(0);
        assert!(!rules().accepts(&ad));
        ad.price = Some(50_001);
        assert!(!rules().accepts(&ad));
        ad.price = Some(50_000);
        assert!(rules().accepts(&ad));
    }

    #[test]
    fn owner_only_requires_confirmed_owner() {
        let mut ad = passing_ad();
        ad.is_owner = Some(false);
        assert!(!rules().accepts(&ad));
        ad.is_owner = None;
        assert!(!rules().accepts(&ad));

        let mut relaxed = rules();
        relaxed.owner_only = false;
        assert!(relaxed.accepts(&ad));
    }

    #[test]
    fn rejects_missing_phone_url_or_images() {
        let mut ad = passing_ad();
        ad.phone = None;
        assert!(!rules().accepts(&ad));

        let mut ad = passing_ad();
        ad.url = String::new();
        assert!(!rules().accepts(&ad));

        let mut ad = passing_ad();
        ad.image_urls.clear();
        assert!(!rules().accepts(&ad));
    }
}
