#[macro_export]
macro_rules! setup_attributes {
    ($attribute_count_range: ident, $attributes_range: ident) => {
        // Hardcoding attribute counts. This should ideally be taken/updated from command line input
        let $attribute_count_range = [2, 4, 6, 8, 15, 20, 30];
        let $attributes_range = $attribute_count_range
            .iter()
            .map(|c| {
                (0..*c)
                    .map(|i| format!("attribute-{}", i))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
    };
}

