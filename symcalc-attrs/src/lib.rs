mod structures;

use proc_macro::TokenStream;
use quote::quote;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The struct can be a unit struct or a struct with named fields. The information displayed for
/// the error is customized with the `error` attribute:
///
/// ```
/// use symcalc_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not defined", self.name),
///     labels = ["this variable"],
///     help = "bind a value to it before evaluating",
/// )]
/// pub struct Unbound {
///     pub name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                         |
/// | --------- | ----------------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error, and by the error's `Display` impl.   |
/// | `labels`  | An array with one label text per span of the error. Empty strings add no message.   |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.        |
///
/// Each tag accepts an expression evaluating to something that implements
/// [`ToString`](std::string::ToString). The expressions are evaluated inside a method of the
/// struct, so `self` can be used to access its fields.
///
/// The generated code refers to the `symcalc_error` and `ariadne` crates, which must be
/// dependencies of the crate using this macro.
///
/// [`ErrorKind`]: https://docs.rs/symcalc-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    quote! {
        impl #impl_generics symcalc_error::ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
