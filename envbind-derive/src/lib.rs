//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type, Visibility};

mod attrs;

use attrs::{ContainerAttrs, FieldAttrs};

/// Extract inner type from Option<T>
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    match &seg.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(syn::GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn optional_str(value: Option<String>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

/// `Record` derive macro
///
/// Implements `envbind::Record` and `envbind::Value` for a struct with named
/// fields, plus an inherent `from_env()` constructor. The struct must
/// implement `Default`.
///
/// Only `pub` fields are part of the schema.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to every variable name
/// - `#[env(json)]`: Allow binding the whole struct from one JSON value
///
/// **Field-level**:
/// - `#[env(name = "VAR")]`: Source environment variable
/// - `#[env(parser = "keyword")]`: Select a registered parser
/// - `#[env(params = "a,b,key=value")]`: Parameters for the parser
/// - `#[env(skip)]`: Leave a public field out of the schema
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(Record, attributes(env))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    let mut visits = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;

        // Only the public schema is bindable
        if attrs.skip || !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }

        let field_ident = field.ident.as_ref().unwrap();
        let field_type = &field.ty;
        let field_name = field_ident.unraw().to_string();
        let type_name = field_type.to_token_stream().to_string();

        let inner_type = option_inner_type(field_type);
        let optional = inner_type.is_some();

        let var = optional_str(attrs.name.map(|name| container.var_name(&name)));
        let parser = optional_str(attrs.parser);
        let params = optional_str(attrs.params);

        descriptors.push(quote! {
            ::envbind::FieldDescriptor {
                name: #field_name,
                type_name: #type_name,
                optional: #optional,
                annotation: ::envbind::Annotation {
                    name: #var,
                    parser: #parser,
                    params: #params,
                },
            }
        });

        let index = visits.len();
        let slot = if optional {
            quote! { ::envbind::slot::Optional(&mut self.#field_ident) }
        } else {
            quote! { ::envbind::slot::Required(&mut self.#field_ident) }
        };
        visits.push(quote! {
            __visit(&__fields[#index], &mut #slot)?;
        });
    }

    // Wholesale decoding of the struct itself
    let coerce = if container.json {
        quote! {
            fn coerce(raw: &str) -> ::core::option::Option<::core::result::Result<Self, ::envbind::BoxError>> {
                ::core::option::Option::Some(::envbind::de::from_json::<Self>(raw))
            }
        }
    } else {
        TokenStream2::new()
    };

    let expanded = quote! {
        impl #impl_generics ::envbind::Record for #struct_name #ty_generics #where_clause {
            fn fields() -> &'static [::envbind::FieldDescriptor] {
                const FIELDS: &[::envbind::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn visit_fields(
                &mut self,
                __visit: &mut ::envbind::FieldVisitor<'_>,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                let __fields = <Self as ::envbind::Record>::fields();
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::envbind::Value for #struct_name #ty_generics #where_clause {
            const KIND: ::envbind::Kind = ::envbind::Kind::Record;

            #coerce

            fn record_fields() -> ::core::option::Option<&'static [::envbind::FieldDescriptor]> {
                ::core::option::Option::Some(<Self as ::envbind::Record>::fields())
            }

            fn as_record(&mut self) -> ::core::option::Option<&mut dyn ::envbind::Record> {
                ::core::option::Option::Some(self)
            }

            fn empty_record() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(<Self as ::core::default::Default>::default())
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Build a default instance and bind it from the process environment
            ///
            /// # Errors
            ///
            /// - Environment variable values cannot be parsed into their field types
            pub fn from_env() -> ::envbind::anyhow::Result<Self> {
                let mut __record = <Self as ::core::default::Default>::default();
                ::envbind::bind(&mut __record)?;
                ::core::result::Result::Ok(__record)
            }
        }
    };

    Ok(expanded)
}
