use crate::domain::Ad;

/// Render the message body for one ad.
///
/// Line order is fixed: location, blank, rooms (if known), property type,
/// offer type (if owner detection succeeded), blank, price (if known), phone
/// (if known), link. Literals are Russian, matching the target audience.
pub fn build_caption(ad: &Ad) -> String {
    let mut lines: Vec<String> = Vec::new();

    let location = match &ad.district {
        Some(district) => format!("{}, {}", ad.city, district),
        None => ad.city.clone(),
    };
    lines.push(location);
    lines.push(String::new());

    if let Some(rooms) = ad.rooms {
        lines.push(format!("Количество комнат: {rooms}"));
    }
    lines.push("Тип недвижимости: Квартира".to_string());
    match ad.is_owner {
        Some(true) => lines.push("Тип предложения: Собственник".to_string()),
        Some(false) => lines.push("Тип предложения: Посредник".to_string()),
        None => {}
    }

    lines.push(String::new());

    if let Some(price) = ad.price {
        let currency = ad.currency.as_deref().unwrap_or("KGS");
        lines.push(format!("Цена: {price} {currency}"));
    }
    if let Some(phone) = &ad.phone {
        lines.push(format!("Телефон: {phone}"));
    }
    lines.push(format!("Ссылка: {}", ad.url));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_ad() -> Ad {
        Ad {
            id: "1".to_string(),
            title: "Объявление".to_string(),
            city: "Бишкек".to_string(),
            district: None,
            rooms: None,
            price: None,
            currency: None,
            is_owner: None,
            phone: None,
            url: "http://ad/1".to_string(),
            image_urls: vec![],
        }
    }

    #[test]
    fn full_ad_renders_every_line_in_order() {
        let ad = Ad {
            district: Some("Центр".to_string()),
            rooms: Some(2),
            price: Some(45_000),
            currency: Some("KGS".to_string()),
            is_owner: Some(true),
            phone: Some("+996700000000".to_string()),
            ..bare_ad()
        };

        let caption = build_caption(&ad);
        assert_eq!(
            caption,
            "Бишкек, Центр\n\
             \n\
             Количество комнат: 2\n\
             Тип недвижимости: Квартира\n\
             Тип предложения: Собственник\n\
             \n\
             Цена: 45000 KGS\n\
             Телефон: +996700000000\n\
             Ссылка: http://ad/1"
        );
    }

    #[test]
    fn bare_ad_keeps_only_location_type_and_link_lines() {
        let caption = build_caption(&bare_ad());
        assert_eq!(
            caption,
            "Бишкек\n\nТип недвижимости: Квартира\n\nСсылка: http://ad/1"
        );
        assert!(!caption.contains("Количество комнат"));
        assert!(!caption.contains("Тип предложения"));
        assert!(!caption.contains("Цена"));
        assert!(!caption.contains("Телефон"));
    }

    #[test]
    fn intermediary_line_for_detected_agents() {
        let ad = Ad {
            is_owner: Some(false),
            ..bare_ad()
        };
        assert!(build_caption(&ad).contains("Тип предложения: Посредник"));
    }

    #[test]
    fn price_falls_back_to_default_currency_code() {
        let ad = Ad {
            price: Some(30_000),
            currency: None,
            ..bare_ad()
        };
        assert!(build_caption(&ad).contains("Цена: 30000 KGS"));
    }
}
