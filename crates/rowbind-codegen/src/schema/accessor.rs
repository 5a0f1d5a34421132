/// A column bound to methods rather than a field:
/// `#[accessor(column = "name", get = method, set = method, key, auto)]`.
#[derive(Debug)]
pub(crate) struct Accessor {
    pub(crate) column: syn::LitStr,
    pub(crate) get: Option<syn::Ident>,
    pub(crate) set: Option<syn::Ident>,
    pub(crate) key: bool,
    pub(crate) auto: bool,
}

mod kw {
    syn::custom_keyword!(column);
    syn::custom_keyword!(get);
    syn::custom_keyword!(set);
    syn::custom_keyword!(key);
    syn::custom_keyword!(auto);
}

impl Accessor {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Accessor> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Accessor {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let span = input.span();

        let mut column = None;
        let mut get = None;
        let mut set = None;
        let mut key = false;
        let mut auto = false;

        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(kw::column) {
                let kw: kw::column = input.parse()?;
                let _eq: syn::Token![=] = input.parse()?;
                if column.is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `column`"));
                }
                column = Some(input.parse::<syn::LitStr>()?);
            } else if lookahead.peek(kw::get) {
                let kw: kw::get = input.parse()?;
                let _eq: syn::Token![=] = input.parse()?;
                if get.is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `get`"));
                }
                get = Some(input.parse()?);
            } else if lookahead.peek(kw::set) {
                let kw: kw::set = input.parse()?;
                let _eq: syn::Token![=] = input.parse()?;
                if set.is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `set`"));
                }
                set = Some(input.parse()?);
            } else if lookahead.peek(kw::key) {
                let _kw: kw::key = input.parse()?;
                key = true;
            } else if lookahead.peek(kw::auto) {
                let _kw: kw::auto = input.parse()?;
                auto = true;
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma: syn::Token![,] = input.parse()?;
        }

        let Some(column) = column else {
            return Err(syn::Error::new(span, "accessor requires `column = \"name\"`"));
        };

        if get.is_none() && set.is_none() {
            return Err(syn::Error::new(span, "accessor requires `get`, `set`, or both"));
        }

        Ok(Accessor {
            column,
            get,
            set,
            key,
            auto,
        })
    }
}
