use docmark::domain::ConversionMethod;

#[test]
fn given_wire_names_when_parsing_then_maps_to_methods() {
    assert_eq!("open-source".parse(), Ok(ConversionMethod::Local));
    assert_eq!("enterprise".parse(), Ok(ConversionMethod::Managed));
}

#[test]
fn given_internal_names_when_parsing_then_also_accepted() {
    assert_eq!("local".parse(), Ok(ConversionMethod::Local));
    assert_eq!(" Managed ".parse(), Ok(ConversionMethod::Managed));
}

#[test]
fn given_unknown_method_when_parsing_then_error_names_the_choices() {
    let err = "magic".parse::<ConversionMethod>().unwrap_err();

    assert_eq!(
        err,
        "Invalid extraction method: 'magic'. Choose 'open-source' or 'enterprise'."
    );
}

#[test]
fn given_method_when_displaying_then_uses_wire_name() {
    assert_eq!(ConversionMethod::Local.to_string(), "open-source");
    assert_eq!(ConversionMethod::Managed.to_string(), "enterprise");
}
